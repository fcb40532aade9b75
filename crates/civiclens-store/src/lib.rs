//! # civiclens-store
//!
//! State layer for the engagement core.
//!
//! This crate provides:
//! - the canonical rows (`User`, `Issue`, `Vote`, `Notification`, `Comment`)
//! - the tagged `Record` envelope and JSONL read/write (portable persistence)
//! - `StateStore` (deterministic in-memory state, votes keyed by pair)
//! - `mutate_state_jsonl` (lock-scoped atomic mutation, one commit per call)
//! - the derived-count integrity check
//!
//! It intentionally does not decide anything: vote transitions, notification
//! rules, and validation live in `civiclens-core` and `civiclens-engage`.
//!
//! ## Data model
//!
//! ```text
//! JSONL (on disk, one tagged record per line)
//!     ↕  hydrate / flush
//! StateStore (deterministic in-memory projection)
//! ```

pub mod atomic;
pub mod comment;
pub mod integrity;
pub mod issue;
pub mod jsonl;
pub mod memory;
pub mod notification;
pub mod record;
pub mod user;
pub mod vote;

pub use atomic::{AtomicStateMutationError, mutate_state_jsonl, state_lock_path};
pub use comment::Comment;
pub use integrity::{
    ENGAGEMENT_CHECK_KIND, EngagementCheckReport, EngagementFinding, EngagementSummary,
    FAILURE_CLASS_DOWNVOTE_DRIFT, FAILURE_CLASS_UPVOTE_DRIFT, FAILURE_CLASS_VOTE_ORPHAN_ISSUE,
    FAILURE_CLASS_VOTE_ORPHAN_VOTER, WARNING_CLASS_COMMENT_ORPHAN_ISSUE,
    WARNING_CLASS_NOTIFICATION_ORPHAN_RECIPIENT, check_engagement_state,
};
pub use issue::Issue;
pub use jsonl::{
    JsonlError, read_records, read_records_from_path, write_records, write_records_to_path,
};
pub use memory::{StateStore, StateStoreError};
pub use notification::Notification;
pub use record::Record;
pub use user::User;
pub use vote::Vote;
