use crate::model::Provider;

#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("the uploaded file does not appear to be a valid PDF")]
    NotAPdf,

    #[error("no text content found in statement")]
    EmptyText,

    #[error("unable to detect mobile money provider. Supported: MTN Mobile Money, Airtel Money")]
    ProviderUndetectable,

    #[error("unknown provider '{0}' (expected 'mtn' or 'airtel')")]
    UnknownProvider(String),

    #[error("no transactions were found in this {provider} statement. Make sure the right provider was selected")]
    NoTransactions { provider: Provider },

    #[error("invalid statement pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
