//! Property tests for the view engines.

use logbook_core::{
    export_csv, filter_entries, matches_search, matches_status, page_bounds, page_window,
    sort_by_date_desc, status_options, total_pages, PageItem, ViewConfig, ViewPipeline, ViewState,
    WINDOW_SIZE,
};
use logbook_protocol::Entry;
use logbook_testkit::generators::{entries_strategy, search_term_strategy, status_filter_strategy};
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #[test]
    fn filter_includes_exactly_the_matching_entries(
        entries in entries_strategy(40),
        term in search_term_strategy(),
        status in status_filter_strategy(),
    ) {
        let filtered = filter_entries(&entries, &term, &status);
        let folded = term.to_lowercase();

        let included: HashSet<_> = filtered.iter().map(|e| e.no).collect();
        for entry in &entries {
            let expected = matches_search(entry, &folded) && matches_status(entry, &status);
            prop_assert_eq!(included.contains(&entry.no), expected);
        }

        // collection order is kept
        let numbers: Vec<i64> = filtered.iter().map(|e| e.no.get()).collect();
        let mut ordered = numbers.clone();
        ordered.sort_unstable();
        prop_assert_eq!(numbers, ordered);
    }

    #[test]
    fn status_options_are_distinct_and_non_empty(entries in entries_strategy(40)) {
        let options = status_options(&entries);

        let unique: HashSet<_> = options.iter().collect();
        prop_assert_eq!(unique.len(), options.len());
        prop_assert!(options.iter().all(|s| !s.is_empty()));

        let expected: HashSet<_> = entries
            .iter()
            .map(|e| &e.status)
            .filter(|s| !s.is_empty())
            .collect();
        prop_assert_eq!(unique, expected);
    }

    #[test]
    fn sort_is_descending_and_stable(entries in entries_strategy(60)) {
        let sorted = sort_by_date_desc(entries.iter().collect::<Vec<&Entry>>());
        prop_assert_eq!(sorted.len(), entries.len());

        for pair in sorted.windows(2) {
            prop_assert!(pair[0].date >= pair[1].date);
            if pair[0].date == pair[1].date {
                // entries are numbered in input order
                prop_assert!(pair[0].no < pair[1].no);
            }
        }
    }

    #[test]
    fn pages_cover_the_view_exactly_once(n in 0usize..200, per_page in 1usize..25) {
        let pages = total_pages(n, per_page);
        let mut covered = 0;

        for page in 1..=pages {
            let bounds = page_bounds(page, per_page, n);
            prop_assert_eq!(bounds.start, covered);
            let len = bounds.len();
            if page < pages {
                prop_assert_eq!(len, per_page);
            } else {
                prop_assert_eq!(len, n - (pages - 1) * per_page);
                prop_assert!(len >= 1 && len <= per_page);
            }
            covered += len;
        }

        prop_assert_eq!(covered, n);
    }

    #[test]
    fn window_is_well_formed(total in 0usize..60, current in 1usize..60) {
        prop_assume!(current <= total.max(1));
        let window = page_window(total, current);

        let numbers: Vec<usize> = window
            .iter()
            .filter_map(|item| match item {
                PageItem::Page(p) => Some(*p),
                PageItem::Ellipsis => None,
            })
            .collect();

        if total == 0 {
            prop_assert!(window.is_empty());
        } else {
            prop_assert_eq!(numbers.first(), Some(&1));
            prop_assert_eq!(numbers.last(), Some(&total));
            prop_assert!(numbers.contains(&current));
            prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }
        if total <= WINDOW_SIZE {
            prop_assert!(!window.contains(&PageItem::Ellipsis));
        }
        prop_assert!(window.len() <= 7);
    }

    #[test]
    fn pipeline_pages_concatenate_to_sorted_view(
        entries in entries_strategy(50),
        term in search_term_strategy(),
        status in status_filter_strategy(),
        per_page in 1usize..12,
    ) {
        let mut state = ViewState::new(&ViewConfig::new().items_per_page(per_page));
        state.set_search_term(term);
        state.set_status_filter(status);

        let pipeline = ViewPipeline::new(&entries);
        let first = pipeline.derive(&mut state);
        let expected: Vec<_> = first.sorted().iter().map(|e| e.no).collect();

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            state.go_to(page, first.total_pages);
            let view = pipeline.derive(&mut state);
            seen.extend(view.page().iter().map(|e| e.no));
        }

        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn export_has_one_record_per_filtered_entry(
        entries in entries_strategy(30),
        status in status_filter_strategy(),
    ) {
        let filtered = filter_entries(&entries, "", &status);
        let text = export_csv(&filtered).unwrap();

        let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        prop_assert_eq!(records.len(), filtered.len());

        for (record, entry) in records.iter().zip(&filtered) {
            let no = entry.no.to_string();
            prop_assert_eq!(&record[0], no.as_str());
            prop_assert_eq!(&record[3], entry.activity.as_str());
            prop_assert_eq!(&record[8], entry.person_in_charge.as_str());
        }
    }
}
