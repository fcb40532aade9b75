//! Vote rows: at most one live row per (issue, voter) pair.

use chrono::{DateTime, Utc};
use civiclens_core::VoteKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One standing vote.
///
/// Switching kinds rewrites `kind` in place and keeps the row; toggling off
/// removes the row entirely. `created_at` stays the first cast's time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: String,
    pub issue_id: String,
    pub voter_id: String,
    pub kind: VoteKind,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

impl Vote {
    pub fn new(
        issue_id: impl Into<String>,
        voter_id: impl Into<String>,
        kind: VoteKind,
        now: DateTime<Utc>,
    ) -> Vote {
        Vote {
            id: Uuid::new_v4().to_string(),
            issue_id: issue_id.into(),
            voter_id: voter_id.into(),
            kind,
            created_at: now,
        }
    }
}
