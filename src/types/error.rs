use chrono::NaiveDate;
use thiserror::Error;

/// weightbot error types
#[derive(Error, Debug)]
pub enum WeightbotError {
    /// Missing or empty construction input
    #[error("config error: {0}")]
    Config(String),

    /// Fetched body does not start with the export header.
    /// Bad credentials, a changed page layout and a broken service all look the same.
    #[error("invalid export format: body does not start with the export header")]
    InvalidExportFormat,

    /// Data line does not have the `date, kg, lb` shape
    #[error("malformed line {line_number}: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    /// Date does not strictly follow the previous one
    #[error("non-chronological order: {current} does not follow {previous}")]
    NonChronologicalOrder {
        previous: NaiveDate,
        current: NaiveDate,
    },

    /// Page is missing the form the login flow expects
    #[error("form error: {0}")]
    Form(String),

    /// HTTP transport failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for weightbot
pub type Result<T> = std::result::Result<T, WeightbotError>;
