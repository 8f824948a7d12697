//! Sort engine.

use logbook_protocol::Entry;
use std::borrow::Borrow;

/// Orders entries by date, most recent first.
///
/// The sort is stable: entries with equal dates keep their input order, so
/// pagination stays deterministic across re-derivations of the same input.
pub fn sort_by_date_desc<E: Borrow<Entry>>(mut entries: Vec<E>) -> Vec<E> {
    entries.sort_by(|a, b| b.borrow().date.cmp(&a.borrow().date));
    entries
}
