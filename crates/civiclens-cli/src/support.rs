use civiclens_core::{IssueStatus, VoteKind};
use civiclens_store::{Comment, Issue, Notification, StateStore, User};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Load the state file for a read path. A missing file reads as an
/// empty store; mutations bootstrap it through the lock instead.
pub fn load_store_or_exit(state_arg: &str) -> (StateStore, PathBuf) {
    let path = PathBuf::from(state_arg);
    let store = StateStore::load_jsonl_or_default(&path).unwrap_or_else(|e| {
        eprintln!("error: failed to load {}: {e}", path.display());
        std::process::exit(1);
    });
    tracing::debug!(
        path = %path.display(),
        users = store.user_count(),
        issues = store.issue_count(),
        "state loaded"
    );
    (store, path)
}

pub fn parse_status_or_exit(raw: &str) -> IssueStatus {
    IssueStatus::parse(raw).unwrap_or_else(|| {
        eprintln!(
            "error: unknown status: {raw} (expected reported, under review, \
             work in progress, or resolved)"
        );
        std::process::exit(1);
    })
}

pub fn parse_vote_kind_or_exit(raw: &str) -> VoteKind {
    VoteKind::parse(raw).unwrap_or_else(|| {
        eprintln!("error: unknown vote kind: {raw} (expected up or down)");
        std::process::exit(1);
    })
}

pub fn user_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "avatar": user.avatar,
        "trustScore": user.trust_score,
        "badges": user.badges,
        "createdAt": user.created_at
    })
}

pub fn issue_json(issue: &Issue) -> Value {
    json!({
        "id": issue.id,
        "title": issue.title,
        "description": issue.description,
        "category": issue.category,
        "subcategory": issue.subcategory,
        "latitude": issue.latitude,
        "longitude": issue.longitude,
        "areaName": issue.area_name,
        "imageUrl": issue.image_url,
        "reporterId": issue.reporter_id,
        "status": issue.status.as_str(),
        "upvotes": issue.upvotes,
        "downvotes": issue.downvotes,
        "createdAt": issue.created_at,
        "updatedAt": issue.updated_at
    })
}

pub fn notification_json(notification: &Notification) -> Value {
    json!({
        "id": notification.id,
        "recipientId": notification.recipient_id,
        "kind": notification.kind.as_str(),
        "title": notification.title,
        "message": notification.message,
        "read": notification.read,
        "createdAt": notification.created_at
    })
}

pub fn comment_json(comment: &Comment) -> Value {
    json!({
        "id": comment.id,
        "issueId": comment.issue_id,
        "authorId": comment.author_id,
        "body": comment.body,
        "createdAt": comment.created_at
    })
}
