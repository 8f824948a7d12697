//! Pagination engine.
//!
//! Pages are 1-based. The window algorithm shows at most [`WINDOW_SIZE`]
//! numeric slots before compressing the rest behind ellipsis markers:
//!
//! ```text
//! T <= 5        1 2 3 .. T
//! C <= 3        1 2 3 4 … T
//! C >= T-2      1 … T-3 T-2 T-1 T
//! otherwise     1 … C-1 C C+1 … T
//! ```

use crate::config::WINDOW_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// One slot of the page-number window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageItem {
    /// A selectable page number.
    Page(usize),
    /// A non-selectable placeholder for elided pages.
    Ellipsis,
}

impl PageItem {
    /// Returns true for page numbers.
    pub fn is_selectable(&self) -> bool {
        matches!(self, PageItem::Page(_))
    }
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(page) => write!(f, "{page}"),
            PageItem::Ellipsis => f.write_str("…"),
        }
    }
}

/// Number of pages needed for `total_items` rows; 0 when there are none.
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1))
}

/// Zero-based row range of `current_page`.
///
/// `first = (current_page - 1) * items_per_page`, `last = min(first +
/// items_per_page, total_items)`. A page beyond the data yields an empty
/// range rather than panicking.
pub fn page_bounds(current_page: usize, items_per_page: usize, total_items: usize) -> Range<usize> {
    let per_page = items_per_page.max(1);
    let first = current_page
        .saturating_sub(1)
        .saturating_mul(per_page)
        .min(total_items);
    let last = first.saturating_add(per_page).min(total_items);
    first..last
}

/// Page-number window for navigation UI.
pub fn page_window(total_pages: usize, current_page: usize) -> Vec<PageItem> {
    use PageItem::{Ellipsis, Page};

    let t = total_pages;
    let c = current_page;

    if t <= WINDOW_SIZE {
        return (1..=t).map(Page).collect();
    }

    if c <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(t)]
    } else if c >= t - 2 {
        vec![Page(1), Ellipsis, Page(t - 3), Page(t - 2), Page(t - 1), Page(t)]
    } else {
        vec![Page(1), Ellipsis, Page(c - 1), Page(c), Page(c + 1), Ellipsis, Page(t)]
    }
}
