//! Configuration for the sync engine.

use logbook_protocol::FETCH_ALL_LIMIT;

/// Configuration for the synchronization manager.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Store URL (e.g. "http://localhost:8080").
    pub base_url: String,
    /// Page size requested on refresh.
    pub list_limit: u32,
    /// Discard refresh completions older than the last applied one.
    pub stale_guard: bool,
}

impl SyncConfig {
    /// Creates a new configuration for the given store.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            list_limit: FETCH_ALL_LIMIT,
            stale_guard: true,
        }
    }

    /// Sets the refresh page size.
    pub fn with_list_limit(mut self, limit: u32) -> Self {
        self.list_limit = limit.max(1);
        self
    }

    /// Enables or disables the stale-response guard.
    pub fn with_stale_guard(mut self, enabled: bool) -> Self {
        self.stale_guard = enabled;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.list_limit, 99_999);
        assert!(config.stale_guard);
    }

    #[test]
    fn builder() {
        let config = SyncConfig::new("http://localhost:8080")
            .with_list_limit(0)
            .with_stale_guard(false);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.list_limit, 1);
        assert!(!config.stale_guard);
    }
}
