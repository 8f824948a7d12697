//! Logbook entries and drafts.

use crate::date::display_date;
use crate::error::{ProtocolError, ProtocolResult};
use crate::status::StatusKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequence number of an entry.
///
/// Assigned once by the remote store and used as the sole correlation key
/// for update and delete. The client never mutates it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryNo(i64);

impl EntryNo {
    /// Wraps a raw sequence number.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw sequence number.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for EntryNo {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntryNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryNo {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// One logged activity record, as held by the client.
///
/// Every field is always present; absent values in remote payloads are
/// normalized away before an `Entry` is built (see [`crate::RawEntry`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Sequence number assigned by the store.
    pub no: EntryNo,
    /// Calendar date of the activity.
    #[serde(rename = "tanggal")]
    pub date: NaiveDate,
    /// Module or feature the activity concerns.
    #[serde(rename = "modul_fitur")]
    pub module_or_feature: String,
    /// What was done.
    #[serde(rename = "aktivitas")]
    pub activity: String,
    /// Technical detail (optional).
    #[serde(rename = "detail_teknis")]
    pub technical_detail: String,
    /// Obstacle encountered (optional).
    #[serde(rename = "kendala")]
    pub obstacle: String,
    /// How the obstacle was resolved (optional).
    #[serde(rename = "solusi")]
    pub resolution: String,
    /// Free-text status.
    pub status: String,
    /// Person in charge.
    #[serde(rename = "pic")]
    pub person_in_charge: String,
}

impl Entry {
    /// Builds an entry from a draft and the number the store assigned to it.
    pub fn from_draft(no: EntryNo, draft: EntryDraft) -> Self {
        Self {
            no,
            date: draft.date,
            module_or_feature: draft.module_or_feature,
            activity: draft.activity,
            technical_detail: draft.technical_detail,
            obstacle: draft.obstacle,
            resolution: draft.resolution,
            status: draft.status,
            person_in_charge: draft.person_in_charge,
        }
    }

    /// Returns the editable part of this entry.
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            date: self.date,
            module_or_feature: self.module_or_feature.clone(),
            activity: self.activity.clone(),
            technical_detail: self.technical_detail.clone(),
            obstacle: self.obstacle.clone(),
            resolution: self.resolution.clone(),
            status: self.status.clone(),
            person_in_charge: self.person_in_charge.clone(),
        }
    }

    /// Date in its held textual form (`YYYY-MM-DD`).
    pub fn date_text(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Date in the short display form.
    pub fn display_date(&self) -> String {
        display_date(self.date)
    }

    /// Presentation class of the status.
    pub fn status_kind(&self) -> StatusKind {
        StatusKind::from_label(&self.status)
    }
}

/// An entry without its sequence number.
///
/// Used as the body of create, and as the full replacement record of update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Calendar date of the activity.
    #[serde(rename = "tanggal")]
    pub date: NaiveDate,
    /// Module or feature the activity concerns.
    #[serde(rename = "modul_fitur", default)]
    pub module_or_feature: String,
    /// What was done.
    #[serde(rename = "aktivitas", default)]
    pub activity: String,
    /// Technical detail (optional).
    #[serde(rename = "detail_teknis", default)]
    pub technical_detail: String,
    /// Obstacle encountered (optional).
    #[serde(rename = "kendala", default)]
    pub obstacle: String,
    /// How the obstacle was resolved (optional).
    #[serde(rename = "solusi", default)]
    pub resolution: String,
    /// Free-text status.
    #[serde(default)]
    pub status: String,
    /// Person in charge.
    #[serde(rename = "pic", default)]
    pub person_in_charge: String,
}

impl EntryDraft {
    /// Creates a draft with the required fields; optional fields are empty.
    pub fn new(
        date: NaiveDate,
        module_or_feature: impl Into<String>,
        activity: impl Into<String>,
        status: impl Into<String>,
        person_in_charge: impl Into<String>,
    ) -> Self {
        Self {
            date,
            module_or_feature: module_or_feature.into(),
            activity: activity.into(),
            technical_detail: String::new(),
            obstacle: String::new(),
            resolution: String::new(),
            status: status.into(),
            person_in_charge: person_in_charge.into(),
        }
    }

    /// Sets the technical detail.
    pub fn with_technical_detail(mut self, detail: impl Into<String>) -> Self {
        self.technical_detail = detail.into();
        self
    }

    /// Sets the obstacle.
    pub fn with_obstacle(mut self, obstacle: impl Into<String>) -> Self {
        self.obstacle = obstacle.into();
        self
    }

    /// Sets the resolution.
    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = resolution.into();
        self
    }

    /// Checks the required-field rule.
    ///
    /// Module/feature, activity, status and PIC must be non-empty after
    /// trimming. All failing fields are reported together.
    pub fn validate(&self) -> ProtocolResult<()> {
        let required = [
            (DraftField::ModuleOrFeature, &self.module_or_feature),
            (DraftField::Activity, &self.activity),
            (DraftField::Status, &self.status),
            (DraftField::PersonInCharge, &self.person_in_charge),
        ];

        let missing: Vec<DraftField> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::Validation(ValidationErrors::new(missing)))
        }
    }
}

/// A required draft field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// Module or feature.
    ModuleOrFeature,
    /// Activity.
    Activity,
    /// Status.
    Status,
    /// Person in charge.
    PersonInCharge,
}

impl DraftField {
    /// Human-readable field label.
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::ModuleOrFeature => "module/feature",
            DraftField::Activity => "activity",
            DraftField::Status => "status",
            DraftField::PersonInCharge => "PIC",
        }
    }
}

/// The set of fields that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<DraftField>,
}

impl ValidationErrors {
    /// Creates a new error set.
    pub fn new(fields: Vec<DraftField>) -> Self {
        Self { fields }
    }

    /// Returns the failing fields.
    pub fn fields(&self) -> &[DraftField] {
        &self.fields
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("{} is required", field.label()))
            .collect();
        write!(f, "{}", messages.join(", "))
    }
}
