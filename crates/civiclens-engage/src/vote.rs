//! Vote casting.
//!
//! One entry point drives the whole toggle machine: a fresh cast adds a
//! ledger row, repeating the same kind removes it, casting the other
//! kind rewrites the row in place. The issue counters move by the
//! transition's deltas in the same mutation, so the ledger and the
//! counts can never drift apart. A switch keeps the original row id
//! and first-cast time.

use std::path::Path;

use chrono::{DateTime, Utc};
use civiclens_core::{VoteAction, VoteKind, apply_vote, notify};
use civiclens_store::{Notification, StateStore, Vote, mutate_state_jsonl};
use serde::Serialize;

use crate::error::{EngageError, EngageJsonlError};

/// One cast from one voter on one issue.
#[derive(Debug, Clone)]
pub struct CastVoteRequest {
    pub issue_id: String,
    pub voter_id: String,
    pub kind: VoteKind,
    pub now: DateTime<Utc>,
}

impl CastVoteRequest {
    pub fn new(issue_id: impl Into<String>, voter_id: impl Into<String>, kind: VoteKind) -> Self {
        Self {
            issue_id: issue_id.into(),
            voter_id: voter_id.into(),
            kind,
            now: Utc::now(),
        }
    }
}

/// What one cast did and the counts it left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReceipt {
    pub action: VoteAction,
    pub upvotes: i64,
    pub downvotes: i64,
}

/// Apply one cast against in-memory state.
///
/// The ledger row, the issue counters, and any reporter notification
/// move together; an `Err` leaves all three untouched.
pub fn cast_vote(
    store: &mut StateStore,
    request: &CastVoteRequest,
) -> Result<VoteReceipt, EngageError> {
    let issue = store
        .issue(&request.issue_id)
        .ok_or_else(|| EngageError::IssueNotFound(request.issue_id.clone()))?;
    let reporter_id = issue.reporter_id.clone();
    let issue_title = issue.title.clone();

    let voter = store
        .user(&request.voter_id)
        .ok_or_else(|| EngageError::UserNotFound(request.voter_id.clone()))?;
    let voter_name = voter.username.clone();

    let previous = store
        .vote_for(&request.issue_id, &request.voter_id)
        .map(|vote| vote.kind);
    let transition = apply_vote(previous, request.kind);

    match transition.next {
        None => {
            store.remove_vote(&request.issue_id, &request.voter_id);
        }
        Some(kind) => {
            // A switch keeps the existing row and its first-cast time.
            let row = match store.vote_for(&request.issue_id, &request.voter_id) {
                Some(existing) => {
                    let mut row = existing.clone();
                    row.kind = kind;
                    row
                }
                None => Vote::new(&request.issue_id, &request.voter_id, kind, request.now),
            };
            store.set_vote(row);
        }
    }

    let issue = store
        .issue_mut(&request.issue_id)
        .ok_or_else(|| EngageError::IssueNotFound(request.issue_id.clone()))?;
    issue.apply_vote_deltas(transition.upvote_delta, transition.downvote_delta);
    issue.touch_updated_at(request.now);
    let receipt = VoteReceipt {
        action: transition.action,
        upvotes: issue.upvotes,
        downvotes: issue.downvotes,
    };

    if let Some(draft) = notify::vote_cast(
        &reporter_id,
        &request.voter_id,
        &voter_name,
        &issue_title,
        transition.action,
        request.kind,
    ) {
        store.insert_notification(Notification::from_draft(draft, request.now));
    }

    tracing::debug!(
        issue_id = %request.issue_id,
        voter_id = %request.voter_id,
        action = transition.action.as_str(),
        "vote applied"
    );
    Ok(receipt)
}

/// Lock-scoped cast against a state JSONL path.
pub fn cast_vote_jsonl(
    path: impl AsRef<Path>,
    request: &CastVoteRequest,
) -> Result<VoteReceipt, EngageJsonlError> {
    mutate_state_jsonl(path, |store| {
        let receipt = cast_vote(store, request)?;
        Ok((receipt, true))
    })
}
