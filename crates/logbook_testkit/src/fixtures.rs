//! Entry fixtures.
//!
//! Deterministic records for unit and integration tests.

use chrono::NaiveDate;
use logbook_protocol::{Entry, EntryDraft, EntryNo, RawEntry};

const MODULES: [&str; 4] = ["Auth", "Billing", "Reports", "Ops"];
const PEOPLE: [&str; 3] = ["Rina", "Dimas", "Agus"];
const STATUSES: [&str; 3] = ["Open", "On Progress", "Done"];

/// A date in January–February 2024, `day` counted from 1 January.
pub fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|start| start.checked_add_days(chrono::Days::new(u64::from(day.saturating_sub(1)))))
        .expect("date in range")
}

/// A complete draft.
pub fn sample_draft() -> EntryDraft {
    EntryDraft::new(day(5), "Auth", "Fix login redirect", "Done", "Rina")
        .with_technical_detail("JWT refresh")
        .with_obstacle("Token expiry race")
        .with_resolution("Refresh before expiry")
}

/// An entry with the given number, date and status.
pub fn entry(no: i64, date: NaiveDate, status: &str) -> Entry {
    Entry::from_draft(
        EntryNo::new(no),
        EntryDraft::new(date, "Auth", format!("Activity {no}"), status, "Rina"),
    )
}

/// The `i`-th draft of a varied, deterministic series.
///
/// Modules, people and statuses rotate at different rates; dates repeat
/// every ten entries so the sort has ties to keep stable.
pub fn varied_draft(i: usize) -> EntryDraft {
    EntryDraft::new(
        day((i % 10) as u32 + 1),
        MODULES[i % MODULES.len()],
        format!("Task {i}"),
        STATUSES[i % STATUSES.len()],
        PEOPLE[i % PEOPLE.len()],
    )
    .with_technical_detail(if i % 5 == 0 { "migration" } else { "" })
}

/// `count` entries numbered from 1, built from [`varied_draft`].
pub fn sample_entries(count: usize) -> Vec<Entry> {
    (0..count)
        .map(|i| Entry::from_draft(EntryNo::new(i as i64 + 1), varied_draft(i)))
        .collect()
}

/// A raw wire record from a JSON value.
pub fn raw(value: serde_json::Value) -> RawEntry {
    serde_json::from_value(value).expect("valid raw entry")
}

/// Wire records for `entries`.
pub fn raw_entries(entries: &[Entry]) -> Vec<RawEntry> {
    entries.iter().map(RawEntry::from).collect()
}
