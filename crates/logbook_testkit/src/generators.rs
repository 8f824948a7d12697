//! Property-based test generators using proptest.
//!
//! Dates are drawn from a narrow range so generated collections contain
//! plenty of equal dates, which is where sort stability matters.

use crate::fixtures::day;
use chrono::NaiveDate;
use logbook_core::StatusFilter;
use logbook_protocol::{Entry, EntryDraft, EntryNo};
use proptest::prelude::*;

/// Strategy for entry dates (60 consecutive days).
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=60).prop_map(day)
}

/// Strategy for status values, including case variants and the empty
/// string.
pub fn status_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Open"),
        Just("On Progress"),
        Just("Done"),
        Just("Canceled"),
        Just("done"),
        Just(""),
    ]
    .prop_map(str::to_string)
}

/// Strategy for short free-text fields.
pub fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z ]{0,12}").expect("Invalid regex")
}

/// Strategy for drafts. Drafts may fail validation.
pub fn draft_strategy() -> impl Strategy<Value = EntryDraft> {
    (
        date_strategy(),
        text_strategy(),
        text_strategy(),
        text_strategy(),
        text_strategy(),
        text_strategy(),
        status_strategy(),
        text_strategy(),
    )
        .prop_map(
            |(date, module, activity, detail, obstacle, resolution, status, pic)| {
                EntryDraft::new(date, module, activity, status, pic)
                    .with_technical_detail(detail)
                    .with_obstacle(obstacle)
                    .with_resolution(resolution)
            },
        )
}

/// Strategy for a single entry.
pub fn entry_strategy() -> impl Strategy<Value = Entry> {
    (1i64..10_000, draft_strategy()).prop_map(|(no, draft)| Entry::from_draft(EntryNo::new(no), draft))
}

/// Strategy for collections of up to `max_len` entries numbered from 1.
pub fn entries_strategy(max_len: usize) -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(draft_strategy(), 0..=max_len).prop_map(|drafts| {
        drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| Entry::from_draft(EntryNo::new(i as i64 + 1), draft))
            .collect()
    })
}

/// Strategy for search terms: mostly short fragments, sometimes empty.
pub fn search_term_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        4 => prop::string::string_regex("[A-Za-z]{1,3}").expect("Invalid regex"),
    ]
}

/// Strategy for status selectors.
pub fn status_filter_strategy() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![
        1 => Just(StatusFilter::All),
        3 => status_strategy().prop_map(StatusFilter::from),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn entries_are_numbered_in_order() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let entries = entries_strategy(15)
                .new_tree(&mut runner)
                .unwrap()
                .current();
            for (i, entry) in entries.iter().enumerate() {
                assert_eq!(entry.no, EntryNo::new(i as i64 + 1));
            }
        }
    }

    proptest! {
        #[test]
        fn dates_stay_in_range(date in date_strategy()) {
            prop_assert!(date >= day(1) && date <= day(60));
        }
    }
}
