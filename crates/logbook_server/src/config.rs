//! Server configuration.

use logbook_protocol::FETCH_ALL_LIMIT;
use std::path::PathBuf;

/// Configuration for the store server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// JSON snapshot file, loaded at start and rewritten after every
    /// mutation. `None` keeps entries in memory only.
    pub data_file: Option<PathBuf>,
    /// Upper bound on the page size of a list request.
    pub max_list_limit: u32,
}

impl ServerConfig {
    /// Creates a new in-memory server configuration.
    pub fn new() -> Self {
        Self {
            data_file: None,
            max_list_limit: FETCH_ALL_LIMIT,
        }
    }

    /// Persists entries to the given file.
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = Some(path.into());
        self
    }

    /// Sets the maximum list page size.
    pub fn with_max_list_limit(mut self, limit: u32) -> Self {
        self.max_list_limit = limit.max(1);
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert!(config.data_file.is_none());
        assert_eq!(config.max_list_limit, 99_999);
    }

    #[test]
    fn config_builder() {
        let config = ServerConfig::new()
            .with_data_file("/tmp/logbook.json")
            .with_max_list_limit(0);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/logbook.json")));
        assert_eq!(config.max_list_limit, 1);
    }
}
