//! The composed view pipeline: filter, sort, paginate.

use crate::error::CoreResult;
use crate::export::ExportArtifact;
use crate::filter::{filter_entries, status_options};
use crate::pagination::{page_bounds, page_window, total_pages, PageItem};
use crate::sort::sort_by_date_desc;
use crate::view_state::ViewState;
use chrono::NaiveDate;
use logbook_protocol::Entry;
use std::ops::Range;

/// Runs the view engines over one snapshot of the authoritative collection.
#[derive(Debug, Clone, Copy)]
pub struct ViewPipeline<'a> {
    entries: &'a [Entry],
}

impl<'a> ViewPipeline<'a> {
    /// Creates a pipeline over a collection snapshot.
    pub fn new(entries: &'a [Entry]) -> Self {
        Self { entries }
    }

    /// Derives the displayable view.
    ///
    /// Clamps `state`'s page first if the filtered view no longer has that
    /// many pages; this is the only implicit change to the state.
    pub fn derive(&self, state: &mut ViewState) -> DerivedView<'a> {
        let filtered = filter_entries(self.entries, state.search_term(), state.status_filter());
        let sorted = sort_by_date_desc(filtered);

        let per_page = state.items_per_page();
        let pages = total_pages(sorted.len(), per_page);
        state.clamp_page(pages);

        let current_page = state.current_page();
        let bounds = page_bounds(current_page, per_page, sorted.len());

        tracing::debug!(
            collection = self.entries.len(),
            filtered = sorted.len(),
            current_page,
            total_pages = pages,
            "derived view"
        );

        DerivedView {
            window: page_window(pages, current_page),
            status_options: status_options(self.entries),
            sorted,
            bounds,
            current_page,
            total_pages: pages,
        }
    }

    /// Exports the filtered view (unsorted, unpaginated, in collection
    /// order), naming the artifact after `date`.
    pub fn export(&self, state: &ViewState, date: NaiveDate) -> CoreResult<ExportArtifact> {
        let filtered = filter_entries(self.entries, state.search_term(), state.status_filter());
        ExportArtifact::build(&filtered, date)
    }

    /// Distinct statuses of the whole collection.
    pub fn status_options(&self) -> Vec<String> {
        status_options(self.entries)
    }
}

/// Result of one derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a> {
    sorted: Vec<&'a Entry>,
    bounds: Range<usize>,
    /// Page the view was derived for, after clamping.
    pub current_page: usize,
    /// Number of pages in the filtered view.
    pub total_pages: usize,
    /// Page-number window for navigation.
    pub window: Vec<PageItem>,
    /// Filter options taken from the unfiltered collection.
    pub status_options: Vec<String>,
}

impl<'a> DerivedView<'a> {
    /// Rows of the current page.
    pub fn page(&self) -> &[&'a Entry] {
        self.sorted.get(self.bounds.clone()).unwrap_or(&[])
    }

    /// The whole filtered view, sorted.
    pub fn sorted(&self) -> &[&'a Entry] {
        &self.sorted
    }

    /// Number of entries in the filtered view.
    pub fn total_items(&self) -> usize {
        self.sorted.len()
    }

    /// Zero-based row range of the current page within [`Self::sorted`].
    pub fn bounds(&self) -> Range<usize> {
        self.bounds.clone()
    }

    /// Returns true when the filtered view is empty.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}
