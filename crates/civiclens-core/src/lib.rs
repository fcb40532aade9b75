//! # CivicLens Core
//!
//! The engagement vocabulary and the pure decisions the rest of the system
//! defers to: how a cast vote transitions a voter's standing, which events
//! notify whom, when two titles name the same issue, how far apart two
//! reports are, and how leaderboard rows order.
//!
//! No I/O. Callers feed state in and persist what comes back.

pub mod duplicate;
pub mod geo;
pub mod notify;
pub mod rank;
pub mod status;
pub mod vote;

pub use duplicate::{DEFAULT_DUPLICATE_RADIUS_METERS, normalize_title, titles_match};
pub use geo::GeoPoint;
pub use notify::{NotificationDraft, NotificationKind};
pub use rank::{RankKey, rank_order};
pub use status::IssueStatus;
pub use vote::{VoteAction, VoteKind, VoteTransition, apply_vote};
