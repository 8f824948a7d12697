//! Filter & search engine.

use crate::view_state::StatusFilter;
use logbook_protocol::Entry;
use std::collections::HashSet;

/// Returns true if `folded_term` occurs in any searchable field.
///
/// `folded_term` must already be lowercased. Searchable fields are
/// module/feature, activity, PIC and technical detail; an empty term
/// matches everything.
pub fn matches_search(entry: &Entry, folded_term: &str) -> bool {
    if folded_term.is_empty() {
        return true;
    }

    [
        &entry.module_or_feature,
        &entry.activity,
        &entry.person_in_charge,
        &entry.technical_detail,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(folded_term))
}

/// Returns true if the entry passes the status selector.
///
/// Exact, case-sensitive comparison.
pub fn matches_status(entry: &Entry, filter: &StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Exact(status) => entry.status == *status,
    }
}

/// Entries matching both the search term and the status selector, in
/// collection order.
pub fn filter_entries<'a>(
    entries: &'a [Entry],
    search_term: &str,
    status: &StatusFilter,
) -> Vec<&'a Entry> {
    let folded = search_term.to_lowercase();
    entries
        .iter()
        .filter(|entry| matches_search(entry, &folded) && matches_status(entry, status))
        .collect()
}

/// Distinct non-empty statuses of the unfiltered collection, in first-seen
/// order.
pub fn status_options(entries: &[Entry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|entry| entry.status.as_str())
        .filter(|status| !status.is_empty() && seen.insert(*status))
        .map(str::to_string)
        .collect()
}
