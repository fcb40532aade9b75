//! Query layer over engagement state.
//!
//! Read-path projections hydrated from `civiclens-store`: the proximity
//! index duplicate detection queries, filtered issue listings, and the
//! leaderboard aggregation. This crate does not own canonical storage and
//! never mutates it; every projection is recomputed from source rows.

pub mod geo;
pub mod issues;
pub mod leaderboard;

pub use geo::{GeoIndex, GeoQueryError, NearbyIssue, ProximitySource};
pub use issues::{IssueFilter, list_issues};
pub use leaderboard::{LeaderboardEntry, top_users};
