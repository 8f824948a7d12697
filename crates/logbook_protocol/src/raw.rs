//! Raw remote records and their normalization.

use crate::date::{date_from_millis, parse_date, today};
use crate::entry::{Entry, EntryNo};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record exactly as the remote store returned it.
///
/// Every field is optional and loosely typed. Call [`RawEntry::normalize`]
/// to get an [`Entry`] in which nothing is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Sequence number.
    #[serde(default)]
    pub no: Option<Value>,
    /// Date or timestamp.
    #[serde(rename = "tanggal", default)]
    pub date: Option<Value>,
    /// Module or feature.
    #[serde(rename = "modul_fitur", default)]
    pub module_or_feature: Option<Value>,
    /// Activity.
    #[serde(rename = "aktivitas", default)]
    pub activity: Option<Value>,
    /// Technical detail.
    #[serde(rename = "detail_teknis", default)]
    pub technical_detail: Option<Value>,
    /// Obstacle.
    #[serde(rename = "kendala", default)]
    pub obstacle: Option<Value>,
    /// Resolution.
    #[serde(rename = "solusi", default)]
    pub resolution: Option<Value>,
    /// Status.
    #[serde(default)]
    pub status: Option<Value>,
    /// Person in charge.
    #[serde(rename = "pic", default)]
    pub person_in_charge: Option<Value>,
}

impl RawEntry {
    /// Normalizes the record, defaulting missing dates to today (UTC).
    pub fn normalize_now(self) -> Entry {
        self.normalize(today())
    }

    /// Normalizes the record.
    ///
    /// Missing numbers become 0, missing or unreadable dates become
    /// `fallback_date`, missing text becomes the empty string. A date of
    /// `""`, `0` or `false` counts as missing.
    pub fn normalize(self, fallback_date: NaiveDate) -> Entry {
        let no = EntryNo::new(number_or_zero(self.no.as_ref()));
        let date = match self.date.as_ref() {
            None | Some(Value::Null) => fallback_date,
            Some(value) => date_or(value, fallback_date, no),
        };

        Entry {
            no,
            date,
            module_or_feature: text_or_empty(self.module_or_feature),
            activity: text_or_empty(self.activity),
            technical_detail: text_or_empty(self.technical_detail),
            obstacle: text_or_empty(self.obstacle),
            resolution: text_or_empty(self.resolution),
            status: text_or_empty(self.status),
            person_in_charge: text_or_empty(self.person_in_charge),
        }
    }
}

impl From<&Entry> for RawEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            no: Some(Value::from(entry.no.get())),
            date: Some(Value::String(entry.date_text())),
            module_or_feature: Some(Value::String(entry.module_or_feature.clone())),
            activity: Some(Value::String(entry.activity.clone())),
            technical_detail: Some(Value::String(entry.technical_detail.clone())),
            obstacle: Some(Value::String(entry.obstacle.clone())),
            resolution: Some(Value::String(entry.resolution.clone())),
            status: Some(Value::String(entry.status.clone())),
            person_in_charge: Some(Value::String(entry.person_in_charge.clone())),
        }
    }
}

fn number_or_zero(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn date_or(value: &Value, fallback: NaiveDate, no: EntryNo) -> NaiveDate {
    let parsed = match value {
        // empty, zero and false mean "no date", like null
        Value::String(s) if s.trim().is_empty() => return fallback,
        Value::Number(n) if n.as_f64() == Some(0.0) => return fallback,
        Value::Bool(false) => return fallback,
        Value::String(s) => parse_date(s),
        Value::Number(n) => n.as_i64().and_then(date_from_millis),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        tracing::warn!(no = %no, value = %value, "unreadable entry date, using fallback");
        fallback
    })
}

fn text_or_empty(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
