//! Error types for the sync engine.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while talking to the remote store.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Network or transport error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Not connected.
    #[error("not connected to the store")]
    NotConnected,

    /// The store answered but refused the request.
    #[error("rejected by store: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),

    /// Protocol error (unexpected response shape).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Codec error.
    #[error("codec error: {0}")]
    Codec(#[from] logbook_protocol::ProtocolError),

    /// Export error.
    #[error("export error: {0}")]
    Export(#[from] logbook_core::CoreError),
}

impl SyncError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a rejection carrying the store's message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(Some(message.into()))
    }

    /// Returns true for failures to reach the store, as opposed to the
    /// store refusing the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, SyncError::Transport(_) | SyncError::NotConnected)
    }

    /// The message supplied by the store, if any.
    pub fn store_message(&self) -> Option<&str> {
        match self {
            SyncError::Rejected(message) => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kinds() {
        assert!(SyncError::transport("connection refused").is_transport());
        assert!(SyncError::NotConnected.is_transport());
        assert!(!SyncError::rejected("duplicate").is_transport());
        assert!(!SyncError::Protocol("bad body".into()).is_transport());
    }

    #[test]
    fn store_message_only_from_rejections() {
        assert_eq!(
            SyncError::rejected("Entry not found").store_message(),
            Some("Entry not found")
        );
        assert_eq!(SyncError::Rejected(None).store_message(), None);
        assert_eq!(SyncError::Rejected(Some("  ".into())).store_message(), None);
        assert_eq!(SyncError::transport("timeout").store_message(), None);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            SyncError::NotConnected.to_string(),
            "not connected to the store"
        );
        assert_eq!(
            SyncError::Rejected(None).to_string(),
            "rejected by store: no message"
        );
        assert_eq!(
            SyncError::rejected("PIC is required").to_string(),
            "rejected by store: PIC is required"
        );
    }
}
