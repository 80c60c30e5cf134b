pub mod detect;
pub mod parse;
pub mod summary;

use momo_core::error::StatementError;
use momo_core::extraction::pdftotext::PdftotextExtractor;
use momo_core::extraction::extract_text;
use momo_core::model::Provider;
use momo_core::ParseOptions;
use std::path::Path;
use tracing::debug;

/// Read statement text from a PDF (via pdftotext) or from a text file.
pub fn load_text(path: &Path, raw_text: bool) -> Result<String, StatementError> {
    let is_text = raw_text
        || path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

    if !is_text {
        let bytes = std::fs::read(path)?;
        return extract_text(&bytes, &PdftotextExtractor::new());
    }

    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "read statement text");
    if text.trim().is_empty() {
        return Err(StatementError::EmptyText);
    }
    Ok(text)
}

pub fn parse_options(provider: Option<String>, no_repair: bool) -> Result<ParseOptions, StatementError> {
    let provider = match provider {
        Some(name) => Some(
            Provider::from_str_loose(&name).ok_or(StatementError::UnknownProvider(name))?,
        ),
        None => None,
    };
    Ok(ParseOptions {
        provider,
        repair_text: !no_repair,
    })
}
