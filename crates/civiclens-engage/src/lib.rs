//! # CivicLens Engage
//!
//! The operation layer of the engagement core. Each module owns one
//! verb of the platform:
//!
//! - [`create`]: report an issue, with duplicate detection and the
//!   reporter trust award.
//! - [`vote`]: cast, toggle, or switch a vote and keep the issue
//!   counters in step with the vote ledger.
//! - [`status`]: move an issue through its lifecycle and tell the
//!   reporter about it.
//! - [`comment`]: attach discussion to an issue.
//! - [`notifications`]: page, mark, and clear a recipient's inbox.
//! - [`leaderboard`]: the validated read over the community ranking.
//!
//! Every operation comes in two forms. The in-memory form takes a
//! `&mut StateStore` and is what tests and embedders drive directly.
//! The `*_jsonl` form wraps the same logic in a lock-scoped
//! load/mutate/flush cycle against a state file, so concurrent
//! processes never interleave partial writes. Both forms reject before
//! touching state: an `Err` from any operation means nothing changed.

pub mod comment;
pub mod create;
pub mod error;
pub mod leaderboard;
pub mod notifications;
pub mod policy;
pub mod status;
pub mod validate;
pub mod vote;

pub use comment::{RecordCommentRequest, record_comment, record_comment_jsonl};
pub use create::{CreateIssueRequest, create_issue, create_issue_jsonl};
pub use error::{EngageError, EngageJsonlError};
pub use leaderboard::top_users;
pub use notifications::{
    clear_notifications, clear_notifications_jsonl, mark_notification_read,
    mark_notification_read_jsonl, notifications_for,
};
pub use policy::{EngagementPolicy, PolicyError, load_policy_toml};
pub use status::{UpdateStatusRequest, update_status, update_status_jsonl};
pub use vote::{CastVoteRequest, VoteReceipt, cast_vote, cast_vote_jsonl};
