//! Error types for the view engines.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the view engines.
///
/// Filtering, sorting and pagination cannot fail; only export does.
#[derive(Debug, Error)]
pub enum CoreError {
    /// CSV writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV writer could not be flushed into its buffer.
    #[error("export buffer error: {0}")]
    Buffer(String),

    /// Exported bytes were not valid UTF-8.
    #[error("export encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
