//! Error types for the logbook protocol.

use crate::entry::ValidationErrors;
use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while encoding, decoding or validating messages.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A query string could not be interpreted.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// An entry draft is missing required fields.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
}

impl ProtocolError {
    /// Returns true if the error was caused by the content of a request
    /// rather than its encoding.
    pub fn is_validation(&self) -> bool {
        matches!(self, ProtocolError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::DraftField;

    #[test]
    fn validation_display_lists_fields() {
        let err = ProtocolError::Validation(ValidationErrors::new(vec![
            DraftField::Activity,
            DraftField::PersonInCharge,
        ]));
        let msg = err.to_string();
        assert!(msg.starts_with("validation failed"));
        assert!(msg.contains("activity is required"));
        assert!(msg.contains("PIC is required"));
        assert!(err.is_validation());
    }

    #[test]
    fn invalid_query_display() {
        let err = ProtocolError::InvalidQuery("page=abc".into());
        assert_eq!(err.to_string(), "invalid query: page=abc");
        assert!(!err.is_validation());
    }
}
