//! Issue rows: the primary record of the engagement core.

use chrono::{DateTime, Utc};
use civiclens_core::{GeoPoint, IssueStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reported civic issue.
///
/// `upvotes`/`downvotes` are a derived cache over the live vote rows. The
/// ledger mutates both sides inside one mutation scope and the integrity
/// check recomputes them; nothing else may write the counts. Issues are
/// never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,

    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub reporter_id: String,
    #[serde(default = "default_status")]
    pub status: IssueStatus,

    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,

    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_timestamp")]
    pub updated_at: DateTime<Utc>,
}

fn default_status() -> IssueStatus {
    IssueStatus::Reported
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

impl Issue {
    /// Build a fresh report with a generated id, zero counts, and status
    /// `Reported`. Optional fields start empty; set them on the value.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        reporter_id: impl Into<String>,
        location: GeoPoint,
        now: DateTime<Utc>,
    ) -> Issue {
        Issue {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            subcategory: None,
            latitude: location.latitude,
            longitude: location.longitude,
            area_name: None,
            image_url: None,
            reporter_id: reporter_id.into(),
            status: IssueStatus::Reported,
            upvotes: 0,
            downvotes: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Move the lifecycle status and the update timestamp together.
    pub fn set_status(&mut self, status: IssueStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Apply count deltas from a vote transition, clamping at zero.
    pub fn apply_vote_deltas(&mut self, upvote_delta: i64, downvote_delta: i64) {
        self.upvotes = (self.upvotes + upvote_delta).max(0);
        self.downvotes = (self.downvotes + downvote_delta).max(0);
    }

    pub fn touch_updated_at(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
