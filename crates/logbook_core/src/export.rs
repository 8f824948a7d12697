//! Export engine.
//!
//! Serializes the filtered (not paginated) view. The header row is written
//! as bare labels; every data field is quoted and quote characters inside a
//! field are doubled, so embedded commas, quotes and newlines survive a round
//! trip through any RFC 4180 reader.

use crate::error::{CoreError, CoreResult};
use chrono::NaiveDate;
use logbook_protocol::Entry;
use std::borrow::Borrow;

/// Header labels, in column order.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "No",
    "Date",
    "Module/Feature",
    "Activity",
    "Technical Detail",
    "Obstacle",
    "Resolution",
    "Status",
    "PIC",
];

/// An in-memory export with its suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, `logbook_<YYYY-MM-DD>.csv`.
    pub filename: String,
    /// CSV text.
    pub content: String,
    /// Number of data rows (header excluded).
    pub rows: usize,
}

impl ExportArtifact {
    /// Builds the artifact for `entries`, naming it after `date`.
    pub fn build<E: Borrow<Entry>>(entries: &[E], date: NaiveDate) -> CoreResult<Self> {
        Ok(Self {
            filename: export_filename(date),
            content: export_csv(entries)?,
            rows: entries.len(),
        })
    }
}

/// Suggested export file name for `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("logbook_{}.csv", date.format("%Y-%m-%d"))
}

/// Renders entries as CSV: a header row, then one row per entry.
pub fn export_csv<E: Borrow<Entry>>(entries: &[E]) -> CoreResult<String> {
    // labels hold no delimiters, so the header needs no quoting
    let mut header = EXPORT_COLUMNS.join(",");
    header.push('\n');

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(header.into_bytes());

    for entry in entries {
        let entry = entry.borrow();
        writer.write_record([
            entry.no.to_string().as_str(),
            entry.date_text().as_str(),
            entry.module_or_feature.as_str(),
            entry.activity.as_str(),
            entry.technical_detail.as_str(),
            entry.obstacle.as_str(),
            entry.resolution.as_str(),
            entry.status.as_str(),
            entry.person_in_charge.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Buffer(e.to_string()))?;

    tracing::debug!(rows = entries.len(), bytes = bytes.len(), "rendered csv export");

    Ok(String::from_utf8(bytes)?)
}
