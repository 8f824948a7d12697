//! Status classification.

use std::fmt;

/// Status labels the entry form offers.
///
/// Not exhaustive: any string is a legal status.
pub const KNOWN_STATUSES: [&str; 4] = ["Open", "On Progress", "Done", "Canceled"];

/// Presentation class of a free-text status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Work not started.
    Open,
    /// Work under way.
    OnProgress,
    /// Work finished.
    Done,
    /// Work abandoned.
    Canceled,
    /// Anything else, including the empty string.
    Other,
}

impl StatusKind {
    /// Classifies a status label.
    ///
    /// Case and inner whitespace are ignored, so `"On Progress"` and
    /// `"on  progress"` classify the same.
    pub fn from_label(label: &str) -> Self {
        let folded: String = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match folded.as_str() {
            "open" => StatusKind::Open,
            "on progress" | "in progress" => StatusKind::OnProgress,
            "done" => StatusKind::Done,
            "canceled" | "cancelled" => StatusKind::Canceled,
            _ => StatusKind::Other,
        }
    }

    /// Returns true for statuses that close out an entry.
    pub fn is_closed(&self) -> bool {
        matches!(self, StatusKind::Done | StatusKind::Canceled)
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusKind::Open => "Open",
            StatusKind::OnProgress => "On Progress",
            StatusKind::Done => "Done",
            StatusKind::Canceled => "Canceled",
            StatusKind::Other => "Other",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_round_trip() {
        for label in KNOWN_STATUSES {
            let kind = StatusKind::from_label(label);
            assert_ne!(kind, StatusKind::Other);
            assert_eq!(kind.to_string(), label);
        }
    }

    #[test]
    fn form_values_classify() {
        assert_eq!(StatusKind::from_label("open"), StatusKind::Open);
        assert_eq!(StatusKind::from_label("on progress"), StatusKind::OnProgress);
        assert_eq!(StatusKind::from_label(" ON   Progress "), StatusKind::OnProgress);
        assert_eq!(StatusKind::from_label("cancelled"), StatusKind::Canceled);
    }

    #[test]
    fn unknown_labels_are_other() {
        assert_eq!(StatusKind::from_label(""), StatusKind::Other);
        assert_eq!(StatusKind::from_label("Pending"), StatusKind::Other);
        assert_eq!(StatusKind::from_label("Döne"), StatusKind::Other);
    }

    #[test]
    fn closed_statuses() {
        assert!(StatusKind::Done.is_closed());
        assert!(StatusKind::Canceled.is_closed());
        assert!(!StatusKind::Open.is_closed());
        assert!(!StatusKind::Other.is_closed());
    }
}
