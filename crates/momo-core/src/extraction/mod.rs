pub mod pdftotext;

use crate::error::StatementError;
use tracing::debug;

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub page_number: usize,
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, StatementError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Cheap check that `bytes` look like a PDF file.
pub fn validate_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}

/// Linearize pages into a single statement text, one page after another.
pub fn join_pages(pages: &[PageContent]) -> String {
    pages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check the magic bytes, extract every page and join them.
///
/// Fails with `NotAPdf` before the backend runs, and with `EmptyText` when
/// the document has no text layer (a scanned statement).
pub fn extract_text(pdf_bytes: &[u8], extractor: &dyn PdfExtractor) -> Result<String, StatementError> {
    if !validate_pdf(pdf_bytes) {
        return Err(StatementError::NotAPdf);
    }
    let pages = extractor.extract_pages(pdf_bytes)?;
    let text = join_pages(&pages);
    if text.trim().is_empty() {
        return Err(StatementError::EmptyText);
    }
    debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted statement text"
    );
    Ok(text)
}
