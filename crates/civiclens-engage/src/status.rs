//! Lifecycle transitions.
//!
//! Any status may move to any other; the ladder is advisory, not
//! enforced. Setting the current status again is accepted and touches
//! `updated_at`, but only a real change notifies the reporter.

use std::path::Path;

use chrono::{DateTime, Utc};
use civiclens_core::{IssueStatus, notify};
use civiclens_store::{Issue, Notification, StateStore, mutate_state_jsonl};

use crate::error::{EngageError, EngageJsonlError};

/// One status move, attributed to the acting user.
#[derive(Debug, Clone)]
pub struct UpdateStatusRequest {
    pub actor_id: String,
    pub issue_id: String,
    pub status: IssueStatus,
    pub now: DateTime<Utc>,
}

impl UpdateStatusRequest {
    pub fn new(
        actor_id: impl Into<String>,
        issue_id: impl Into<String>,
        status: IssueStatus,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            issue_id: issue_id.into(),
            status,
            now: Utc::now(),
        }
    }
}

/// Move an issue's status against in-memory state.
pub fn update_status(
    store: &mut StateStore,
    request: &UpdateStatusRequest,
) -> Result<Issue, EngageError> {
    let issue = store
        .issue_mut(&request.issue_id)
        .ok_or_else(|| EngageError::IssueNotFound(request.issue_id.clone()))?;
    let old = issue.status;
    issue.set_status(request.status, request.now);
    let snapshot = issue.clone();

    if let Some(draft) =
        notify::status_changed(&snapshot.reporter_id, &snapshot.title, old, request.status)
    {
        store.insert_notification(Notification::from_draft(draft, request.now));
    }

    tracing::debug!(
        actor_id = %request.actor_id,
        issue_id = %snapshot.id,
        from = old.as_str(),
        to = request.status.as_str(),
        "status updated"
    );
    Ok(snapshot)
}

/// Lock-scoped status move against a state JSONL path.
pub fn update_status_jsonl(
    path: impl AsRef<Path>,
    request: &UpdateStatusRequest,
) -> Result<Issue, EngageJsonlError> {
    mutate_state_jsonl(path, |store| {
        let issue = update_status(store, request)?;
        Ok((issue, true))
    })
}
