//! Client-side view state.

use crate::config::ViewConfig;
use crate::pagination::PageItem;
use logbook_protocol::STATUS_ALL;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status selector: every status, or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    /// Matches every entry.
    #[default]
    All,
    /// Matches entries whose status equals this value exactly.
    Exact(String),
}

impl StatusFilter {
    /// Returns the value sent to the remote store.
    pub fn as_str(&self) -> &str {
        match self {
            StatusFilter::All => STATUS_ALL,
            StatusFilter::Exact(status) => status,
        }
    }
}

impl From<String> for StatusFilter {
    fn from(value: String) -> Self {
        if value == STATUS_ALL {
            StatusFilter::All
        } else {
            StatusFilter::Exact(value)
        }
    }
}

impl From<&str> for StatusFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => STATUS_ALL.to_string(),
            StatusFilter::Exact(status) => status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search, filter and page state of one view session.
///
/// Never persisted by the engine, but serializable so callers can snapshot
/// it. Mutated only through user-driven setters and the navigation
/// primitives; the only implicit change is [`ViewState::clamp_page`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    search_term: String,
    status_filter: StatusFilter,
    current_page: usize,
    items_per_page: usize,
}

impl ViewState {
    /// Creates the session-start state.
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            search_term: String::new(),
            status_filter: StatusFilter::All,
            current_page: 1,
            items_per_page: config.items_per_page.max(1),
        }
    }

    /// Current search term.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Sets the search term. The page is left alone; the next derivation
    /// clamps it if it no longer exists.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Current status filter.
    pub fn status_filter(&self) -> &StatusFilter {
        &self.status_filter
    }

    /// Sets the status filter.
    pub fn set_status_filter(&mut self, filter: impl Into<StatusFilter>) {
        self.status_filter = filter.into();
    }

    /// Current 1-based page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Rows per page.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page.max(1)
    }

    /// Resets the page to 1 when it lies beyond `total_pages`.
    ///
    /// Returns true if the page changed.
    pub fn clamp_page(&mut self, total_pages: usize) -> bool {
        if (self.current_page > total_pages || self.current_page == 0) && self.current_page != 1 {
            tracing::debug!(
                from = self.current_page,
                total_pages,
                "current page out of range, resetting to 1"
            );
            self.current_page = 1;
            return true;
        }
        false
    }

    /// Moves one page back, if there is one.
    pub fn previous(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Moves one page forward, if there is one.
    pub fn next(&mut self, total_pages: usize) -> bool {
        if self.current_page < total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `page` when `1 <= page <= total_pages`.
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> bool {
        if (1..=total_pages).contains(&page) {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    /// Applies a page-window item. Ellipsis markers do nothing.
    pub fn select(&mut self, item: PageItem, total_pages: usize) -> bool {
        match item {
            PageItem::Page(page) => self.go_to(page, total_pages),
            PageItem::Ellipsis => false,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(&ViewConfig::default())
    }
}
