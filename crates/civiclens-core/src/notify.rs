//! Notification trigger rules.
//!
//! Each rule is a pure function from an engagement event to an optional
//! draft. Suppression decisions live here; persistence assigns ids and
//! timestamps. Rules never look at storage, so every suppression case is
//! testable as a plain function call.

use serde::{Deserialize, Serialize};

use crate::status::IssueStatus;
use crate::vote::{VoteAction, VoteKind};

/// Category a notification lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    #[serde(rename = "Status Updates")]
    StatusUpdates,
    Reactions,
    Badges,
    Milestones,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::StatusUpdates => "Status Updates",
            NotificationKind::Reactions => "Reactions",
            NotificationKind::Badges => "Badges",
            NotificationKind::Milestones => "Milestones",
        }
    }
}

/// A notification ready to persist, minus id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub recipient_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// Status rule: the reporter hears about every real transition.
/// A no-op change (old == new) stays silent.
pub fn status_changed(
    reporter_id: &str,
    issue_title: &str,
    old: IssueStatus,
    new: IssueStatus,
) -> Option<NotificationDraft> {
    if old == new {
        return None;
    }
    Some(NotificationDraft {
        recipient_id: reporter_id.to_string(),
        kind: NotificationKind::StatusUpdates,
        title: "Issue Status Updated".to_string(),
        message: format!("Your issue '{issue_title}' status changed from {old} to {new}"),
    })
}

/// Vote rule: only gaining an upvote notifies, and never for the reporter's
/// own cast. Removals and switches away from upvote stay silent.
pub fn vote_cast(
    reporter_id: &str,
    voter_id: &str,
    voter_name: &str,
    issue_title: &str,
    action: VoteAction,
    cast: VoteKind,
) -> Option<NotificationDraft> {
    if voter_id == reporter_id {
        return None;
    }
    let gained_upvote = cast == VoteKind::Upvote
        && matches!(action, VoteAction::Added | VoteAction::Switched);
    if !gained_upvote {
        return None;
    }
    Some(NotificationDraft {
        recipient_id: reporter_id.to_string(),
        kind: NotificationKind::Reactions,
        title: "New Upvote".to_string(),
        message: format!("{voter_name} upvoted your issue '{issue_title}'"),
    })
}

/// Comment rule: commenting on your own issue stays silent.
pub fn comment_added(
    reporter_id: &str,
    commenter_id: &str,
    commenter_name: &str,
    issue_title: &str,
) -> Option<NotificationDraft> {
    if commenter_id == reporter_id {
        return None;
    }
    Some(NotificationDraft {
        recipient_id: reporter_id.to_string(),
        kind: NotificationKind::Reactions,
        title: "New Comment".to_string(),
        message: format!("{commenter_name} commented on your issue '{issue_title}'"),
    })
}
