//! Date parsing and display.
//!
//! Entries carry calendar dates, but the remote store may hand them back as
//! full timestamps. Everything is reduced to a `NaiveDate`; timestamps with an
//! offset are converted to UTC first.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a date or timestamp string into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive timestamps. Returns
/// `None` for empty or unrecognised input.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|ts| ts.date())
}

/// Converts epoch milliseconds into a UTC calendar date.
pub(crate) fn date_from_millis(millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|ts| ts.date_naive())
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Renders a date in the short table form, e.g. `05 Mar 2024`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_dates() {
        assert_eq!(parse_date("2024-03-05"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("  2024-03-05 "), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn parses_rfc3339_in_utc() {
        assert_eq!(parse_date("2024-03-05T10:00:00Z"), Some(ymd(2024, 3, 5)));
        assert_eq!(
            parse_date("2024-03-05T10:00:00.000Z"),
            Some(ymd(2024, 3, 5))
        );
        // 01:00 at +07:00 is still the previous day in UTC
        assert_eq!(
            parse_date("2024-03-05T01:00:00+07:00"),
            Some(ymd(2024, 3, 4))
        );
    }

    #[test]
    fn parses_naive_timestamps() {
        assert_eq!(parse_date("2024-03-05T23:59:59"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05 08:15:00"), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn millis_conversion() {
        // 2024-03-05T00:00:00Z
        assert_eq!(date_from_millis(1_709_596_800_000), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn display_form() {
        assert_eq!(display_date(ymd(2024, 3, 5)), "05 Mar 2024");
    }
}
