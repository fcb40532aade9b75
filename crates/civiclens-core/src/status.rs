//! Issue lifecycle statuses.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a reported issue.
///
/// Serialized as the display strings the rest of the system shows users,
/// so stored records and JSON payloads carry "Under Review" rather than an
/// internal token. Transitions are unrestricted: any status may move to any
/// other through the status-update entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    Reported,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "Work in Progress")]
    WorkInProgress,
    Resolved,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::Reported,
        IssueStatus::UnderReview,
        IssueStatus::WorkInProgress,
        IssueStatus::Resolved,
    ];

    /// Canonical display string, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Reported => "Reported",
            IssueStatus::UnderReview => "Under Review",
            IssueStatus::WorkInProgress => "Work in Progress",
            IssueStatus::Resolved => "Resolved",
        }
    }

    /// Parse user input. Accepts the canonical string in any case, plus the
    /// hyphenated or underscored forms CLI flags tend to arrive in.
    pub fn parse(raw: &str) -> Option<IssueStatus> {
        let folded = raw.trim().to_lowercase().replace(['-', '_'], " ");
        IssueStatus::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == folded)
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
