//! Comments on issues.

use std::path::Path;

use chrono::{DateTime, Utc};
use civiclens_core::notify;
use civiclens_store::{Comment, Notification, StateStore, mutate_state_jsonl};

use crate::error::{EngageError, EngageJsonlError};
use crate::validate::clean_comment_body;

/// One comment from one author on one issue.
#[derive(Debug, Clone)]
pub struct RecordCommentRequest {
    pub issue_id: String,
    pub author_id: String,
    pub body: String,
    pub now: DateTime<Utc>,
}

impl RecordCommentRequest {
    pub fn new(
        issue_id: impl Into<String>,
        author_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            issue_id: issue_id.into(),
            author_id: author_id.into(),
            body: body.into(),
            now: Utc::now(),
        }
    }
}

/// Attach one comment against in-memory state. The reporter hears about
/// it unless they wrote it themselves.
pub fn record_comment(
    store: &mut StateStore,
    request: &RecordCommentRequest,
) -> Result<Comment, EngageError> {
    let body = clean_comment_body(&request.body)?;

    let issue = store
        .issue(&request.issue_id)
        .ok_or_else(|| EngageError::IssueNotFound(request.issue_id.clone()))?;
    let reporter_id = issue.reporter_id.clone();
    let issue_title = issue.title.clone();

    let author = store
        .user(&request.author_id)
        .ok_or_else(|| EngageError::UserNotFound(request.author_id.clone()))?;
    let author_name = author.username.clone();

    let comment = Comment::new(&request.issue_id, &request.author_id, body, request.now);
    store.insert_comment(comment.clone());

    if let Some(draft) =
        notify::comment_added(&reporter_id, &request.author_id, &author_name, &issue_title)
    {
        store.insert_notification(Notification::from_draft(draft, request.now));
    }

    tracing::debug!(
        issue_id = %request.issue_id,
        author_id = %request.author_id,
        "comment recorded"
    );
    Ok(comment)
}

/// Lock-scoped comment against a state JSONL path.
pub fn record_comment_jsonl(
    path: impl AsRef<Path>,
    request: &RecordCommentRequest,
) -> Result<Comment, EngageJsonlError> {
    mutate_state_jsonl(path, |store| {
        let comment = record_comment(store, request)?;
        Ok((comment, true))
    })
}
