//! Canonical in-memory representation of engagement state.
//!
//! This is the memory boundary for `civiclens-store`:
//! - load/store JSONL
//! - deterministic row queries, votes keyed by (issue, voter)
//! - no orchestration concerns (no transition rules, no dispatch here)

use std::collections::BTreeMap;
use std::path::Path;

use crate::comment::Comment;
use crate::issue::Issue;
use crate::jsonl::{JsonlError, read_records_from_path, write_records_to_path};
use crate::notification::Notification;
use crate::record::Record;
use crate::user::User;
use crate::vote::Vote;

/// Errors raised while loading or mutating the state store.
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error(transparent)]
    Jsonl(#[from] JsonlError),

    #[error("username already taken: {0}")]
    UsernameTaken(String),

    #[error("record id already present: {0}")]
    DuplicateId(String),
}

/// Canonical in-memory state for users, issues, votes, notifications, and
/// comments.
///
/// Votes are keyed by the `(issue_id, voter_id)` pair, so "at most one live
/// vote per voter per issue" holds structurally; the ledger implements
/// toggle semantics on top of replace/remove.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    users: BTreeMap<String, User>,
    issues: BTreeMap<String, Issue>,
    votes: BTreeMap<(String, String), Vote>,
    notifications: BTreeMap<String, Notification>,
    comments: BTreeMap<String, Comment>,
}

impl StateStore {
    /// Build a store from fully-materialized records.
    ///
    /// Duplicate keys resolve with deterministic last-write-wins semantics,
    /// matching append/overlay behavior in JSONL sync workflows.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut store = StateStore::default();
        for record in records {
            match record {
                Record::User(user) => {
                    store.users.insert(user.id.clone(), user);
                }
                Record::Issue(issue) => {
                    store.issues.insert(issue.id.clone(), issue);
                }
                Record::Vote(vote) => {
                    store
                        .votes
                        .insert((vote.issue_id.clone(), vote.voter_id.clone()), vote);
                }
                Record::Notification(notification) => {
                    store
                        .notifications
                        .insert(notification.id.clone(), notification);
                }
                Record::Comment(comment) => {
                    store.comments.insert(comment.id.clone(), comment);
                }
            }
        }
        store
    }

    /// Emit every row as records in deterministic order: users, issues,
    /// votes, notifications, comments, each in key order.
    pub fn records(&self) -> Vec<Record> {
        let mut records = Vec::with_capacity(
            self.users.len()
                + self.issues.len()
                + self.votes.len()
                + self.notifications.len()
                + self.comments.len(),
        );
        records.extend(self.users.values().cloned().map(Record::User));
        records.extend(self.issues.values().cloned().map(Record::Issue));
        records.extend(self.votes.values().cloned().map(Record::Vote));
        records.extend(
            self.notifications
                .values()
                .cloned()
                .map(Record::Notification),
        );
        records.extend(self.comments.values().cloned().map(Record::Comment));
        records
    }

    /// Load store state from a JSONL file.
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Self, StateStoreError> {
        let records = read_records_from_path(path)?;
        Ok(Self::from_records(records))
    }

    /// Load store state, treating a missing file as an empty store.
    /// The first mutation bootstraps the file.
    pub fn load_jsonl_or_default(path: impl AsRef<Path>) -> Result<Self, StateStoreError> {
        if !path.as_ref().exists() {
            return Ok(StateStore::default());
        }
        Self::load_jsonl(path)
    }

    /// Persist store state to a JSONL file.
    pub fn save_jsonl(&self, path: impl AsRef<Path>) -> Result<(), StateStoreError> {
        write_records_to_path(path, &self.records())?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.issues.is_empty()
            && self.votes.is_empty()
            && self.notifications.is_empty()
            && self.comments.is_empty()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    // ── Users ──

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.get_mut(id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username == username)
    }

    /// Insert a new profile. Ids and usernames must both be unused.
    pub fn insert_user(&mut self, user: User) -> Result<(), StateStoreError> {
        if self.users.contains_key(&user.id) {
            return Err(StateStoreError::DuplicateId(user.id));
        }
        if self.user_by_username(&user.username).is_some() {
            return Err(StateStoreError::UsernameTaken(user.username));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Iterate all users in deterministic id order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    // ── Issues ──

    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues.get(id)
    }

    pub fn issue_mut(&mut self, id: &str) -> Option<&mut Issue> {
        self.issues.get_mut(id)
    }

    /// Insert or replace an issue by id. Returns the previous row if present.
    pub fn upsert_issue(&mut self, issue: Issue) -> Option<Issue> {
        self.issues.insert(issue.id.clone(), issue)
    }

    /// Iterate all issues in deterministic id order.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.values()
    }

    // ── Votes ──

    /// The live vote one voter holds on one issue, if any.
    pub fn vote_for(&self, issue_id: &str, voter_id: &str) -> Option<&Vote> {
        self.votes
            .get(&(issue_id.to_string(), voter_id.to_string()))
    }

    /// Insert or replace the vote for its (issue, voter) pair.
    /// Returns the previous row if present.
    pub fn set_vote(&mut self, vote: Vote) -> Option<Vote> {
        self.votes
            .insert((vote.issue_id.clone(), vote.voter_id.clone()), vote)
    }

    /// Remove the vote for a (issue, voter) pair, returning it if present.
    pub fn remove_vote(&mut self, issue_id: &str, voter_id: &str) -> Option<Vote> {
        self.votes
            .remove(&(issue_id.to_string(), voter_id.to_string()))
    }

    /// Iterate all votes in deterministic (issue, voter) order.
    pub fn votes(&self) -> impl Iterator<Item = &Vote> {
        self.votes.values()
    }

    // ── Notifications ──

    pub fn notification(&self, id: &str) -> Option<&Notification> {
        self.notifications.get(id)
    }

    pub fn notification_mut(&mut self, id: &str) -> Option<&mut Notification> {
        self.notifications.get_mut(id)
    }

    pub fn insert_notification(&mut self, notification: Notification) {
        self.notifications
            .insert(notification.id.clone(), notification);
    }

    /// Iterate all notifications in deterministic id order.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.values()
    }

    /// One recipient's notifications, newest first (id breaks timestamp
    /// ties so paging is stable).
    pub fn notifications_of(&self, recipient_id: &str) -> Vec<&Notification> {
        let mut rows: Vec<&Notification> = self
            .notifications
            .values()
            .filter(|n| n.recipient_id == recipient_id)
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        rows
    }

    /// Erase every notification addressed to `recipient_id`. Returns how
    /// many rows were removed. Other recipients' rows are untouched.
    pub fn remove_notifications_of(&mut self, recipient_id: &str) -> usize {
        let before = self.notifications.len();
        self.notifications
            .retain(|_, n| n.recipient_id != recipient_id);
        before - self.notifications.len()
    }

    // ── Comments ──

    pub fn insert_comment(&mut self, comment: Comment) {
        self.comments.insert(comment.id.clone(), comment);
    }

    /// Iterate all comments in deterministic id order.
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.values()
    }

    /// One issue's comments, oldest first.
    pub fn comments_of(&self, issue_id: &str) -> Vec<&Comment> {
        let mut rows: Vec<&Comment> = self
            .comments
            .values()
            .filter(|c| c.issue_id == issue_id)
            .collect();
        rows.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use civiclens_core::{GeoPoint, NotificationDraft, NotificationKind, VoteKind};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn issue(title: &str) -> Issue {
        Issue::new(
            title,
            "Something broke near the corner.",
            "roads",
            "user-1",
            GeoPoint::new(40.7128, -74.0060),
            fixed_now(),
        )
    }

    fn notification_for(recipient: &str, offset_minutes: i64) -> Notification {
        let draft = NotificationDraft {
            recipient_id: recipient.to_string(),
            kind: NotificationKind::Reactions,
            title: "New Upvote".to_string(),
            message: "someone upvoted your issue".to_string(),
        };
        Notification::from_draft(draft, fixed_now() + Duration::minutes(offset_minutes))
    }

    #[test]
    fn duplicate_record_keys_use_last_write_wins() {
        let mut first = issue("Original title");
        first.id = "i-1".to_string();
        let mut second = issue("Replacement title");
        second.id = "i-1".to_string();

        let store =
            StateStore::from_records(vec![Record::Issue(first), Record::Issue(second)]);
        assert_eq!(store.issue_count(), 1);
        assert_eq!(
            store.issue("i-1").expect("issue must exist").title,
            "Replacement title"
        );
    }

    #[test]
    fn records_emission_is_deterministic() {
        let mut store = StateStore::default();
        store
            .insert_user(User::new("zoe", fixed_now()))
            .expect("user inserts");
        store
            .insert_user(User::new("ari", fixed_now()))
            .expect("user inserts");
        store.upsert_issue(issue("Broken Light"));

        let a = serde_json::to_string(&store.records()).expect("serialize");
        let b = serde_json::to_string(&store.records()).expect("serialize");
        assert_eq!(a, b);
    }

    #[test]
    fn set_vote_replaces_the_pair_row() {
        let mut store = StateStore::default();
        store.set_vote(Vote::new("i-1", "u-1", VoteKind::Upvote, fixed_now()));
        store.set_vote(Vote::new("i-1", "u-1", VoteKind::Downvote, fixed_now()));

        assert_eq!(store.vote_count(), 1);
        let held = store.vote_for("i-1", "u-1").expect("vote must exist");
        assert_eq!(held.kind, VoteKind::Downvote);
    }

    #[test]
    fn votes_key_on_both_issue_and_voter() {
        let mut store = StateStore::default();
        store.set_vote(Vote::new("i-1", "u-1", VoteKind::Upvote, fixed_now()));
        store.set_vote(Vote::new("i-1", "u-2", VoteKind::Upvote, fixed_now()));
        store.set_vote(Vote::new("i-2", "u-1", VoteKind::Downvote, fixed_now()));

        assert_eq!(store.vote_count(), 3);
        assert!(store.vote_for("i-2", "u-2").is_none());
        assert!(store.remove_vote("i-1", "u-1").is_some());
        assert_eq!(store.vote_count(), 2);
    }

    #[test]
    fn notifications_of_orders_newest_first_and_scopes_by_recipient() {
        let mut store = StateStore::default();
        store.insert_notification(notification_for("u-1", 0));
        store.insert_notification(notification_for("u-1", 5));
        store.insert_notification(notification_for("u-2", 10));

        let rows = store.notifications_of("u-1");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].created_at > rows[1].created_at);
    }

    #[test]
    fn remove_notifications_of_touches_only_one_recipient() {
        let mut store = StateStore::default();
        store.insert_notification(notification_for("u-1", 0));
        store.insert_notification(notification_for("u-1", 1));
        store.insert_notification(notification_for("u-2", 2));

        let removed = store.remove_notifications_of("u-1");
        assert_eq!(removed, 2);
        assert_eq!(store.notification_count(), 1);
        assert_eq!(store.notifications_of("u-2").len(), 1);
    }

    #[test]
    fn insert_user_rejects_taken_usernames() {
        let mut store = StateStore::default();
        store
            .insert_user(User::new("casey", fixed_now()))
            .expect("first insert succeeds");

        let err = store
            .insert_user(User::new("casey", fixed_now()))
            .expect_err("duplicate username must be rejected");
        assert!(matches!(err, StateStoreError::UsernameTaken(name) if name == "casey"));
    }

    #[test]
    fn comments_of_orders_oldest_first() {
        let mut store = StateStore::default();
        store.insert_comment(Comment::new(
            "i-1",
            "u-2",
            "Second comment",
            fixed_now() + Duration::minutes(1),
        ));
        store.insert_comment(Comment::new("i-1", "u-1", "First comment", fixed_now()));
        store.insert_comment(Comment::new("i-2", "u-1", "Other issue", fixed_now()));

        let rows = store.comments_of("i-1");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].body, "First comment");
    }
}
