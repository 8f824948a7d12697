//! Error types for the store server.

use logbook_protocol::{EntryNo, ValidationErrors};
use thiserror::Error;

/// Client-facing message for storage failures.
pub const STORAGE_FAILURE_MESSAGE: &str = "Failed to save logbook data";

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the store server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Invalid request format.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A draft is missing required fields.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// No entry has this number.
    #[error("Entry {0} not found")]
    NotFound(EntryNo),

    /// No route matches the path.
    #[error("no route for {0}")]
    UnknownRoute(String),

    /// The route exists but not for this method.
    #[error("method {method} not allowed for {path}")]
    MethodNotAllowed {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
    },

    /// Snapshot encoding or decoding failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The entry number counter reached its maximum.
    #[error("entry numbers exhausted")]
    NumbersExhausted,
}

impl ServerError {
    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServerError::InvalidRequest(_)
                | ServerError::Validation(_)
                | ServerError::NotFound(_)
                | ServerError::UnknownRoute(_)
                | ServerError::MethodNotAllowed { .. }
        )
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            ServerError::Snapshot(_) | ServerError::Io(_) | ServerError::NumbersExhausted
        )
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::InvalidRequest(_) | ServerError::Validation(_) => 400,
            ServerError::NotFound(_) | ServerError::UnknownRoute(_) => 404,
            ServerError::MethodNotAllowed { .. } => 405,
            ServerError::Snapshot(_) | ServerError::Io(_) | ServerError::NumbersExhausted => 500,
        }
    }

    /// Message sent to the client. Storage failures get a fixed text; the
    /// detail only goes to the log.
    pub fn client_message(&self) -> String {
        match self {
            ServerError::Snapshot(_) | ServerError::Io(_) => STORAGE_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<logbook_protocol::ProtocolError> for ServerError {
    fn from(error: logbook_protocol::ProtocolError) -> Self {
        match error {
            logbook_protocol::ProtocolError::Validation(fields) => ServerError::Validation(fields),
            other => ServerError::InvalidRequest(other.to_string()),
        }
    }
}
