//! View configuration.

/// Number of numeric slots in the page window before ellipsis compression.
pub const WINDOW_SIZE: usize = 5;

/// Configuration for a view session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Rows per page. Fixed for the session, always at least 1.
    pub items_per_page: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { items_per_page: 10 }
    }
}

impl ViewConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets rows per page. Zero is raised to 1.
    #[must_use]
    pub const fn items_per_page(mut self, value: usize) -> Self {
        self.items_per_page = if value == 0 { 1 } else { value };
        self
    }
}
