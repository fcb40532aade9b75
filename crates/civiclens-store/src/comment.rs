//! Comment rows, kept thin: the dispatcher needs the event, not a thread
//! model. Rendering and moderation live outside this system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub issue_id: String,
    pub author_id: String,
    pub body: String,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

impl Comment {
    pub fn new(
        issue_id: impl Into<String>,
        author_id: impl Into<String>,
        body: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Comment {
        Comment {
            id: Uuid::new_v4().to_string(),
            issue_id: issue_id.into(),
            author_id: author_id.into(),
            body: body.into(),
            created_at: now,
        }
    }
}
