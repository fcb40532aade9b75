//! Notification rows.

use chrono::{DateTime, Utc};
use civiclens_core::{NotificationDraft, NotificationKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One delivered notification.
///
/// Rows are created only by the dispatch rules, mutated only to flip `read`,
/// and erased only by the recipient's own clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub recipient_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

impl Notification {
    /// Materialize a draft the dispatch rules produced.
    pub fn from_draft(draft: NotificationDraft, now: DateTime<Utc>) -> Notification {
        Notification {
            id: Uuid::new_v4().to_string(),
            recipient_id: draft.recipient_id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            read: false,
            created_at: now,
        }
    }
}
