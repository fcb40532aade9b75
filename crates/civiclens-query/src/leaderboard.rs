//! Leaderboard aggregation.
//!
//! Recomputed from source rows on every call; nothing caches ranks and no
//! row stores its position.

use std::collections::BTreeMap;

use civiclens_core::{RankKey, rank_order};
use civiclens_store::StateStore;
use serde::{Deserialize, Serialize};

/// One leaderboard row. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub trust_score: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<String>,
    pub total_issues: i64,
    pub total_upvotes: i64,
}

/// Rank every user by the upvotes their reports earned.
///
/// Users with no issues still appear (zero issues, zero upvotes). Ties
/// break by issue count, then user id, so equal inputs always produce the
/// same ordering.
pub fn top_users(store: &StateStore, limit: usize) -> Vec<LeaderboardEntry> {
    let mut per_reporter: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for issue in store.issues() {
        let entry = per_reporter
            .entry(issue.reporter_id.as_str())
            .or_insert((0, 0));
        entry.0 += 1;
        entry.1 += issue.upvotes;
    }

    let mut entries: Vec<LeaderboardEntry> = store
        .users()
        .map(|user| {
            let (total_issues, total_upvotes) = per_reporter
                .get(user.id.as_str())
                .copied()
                .unwrap_or((0, 0));
            LeaderboardEntry {
                user_id: user.id.clone(),
                username: user.username.clone(),
                avatar: user.avatar.clone(),
                trust_score: user.trust_score,
                badges: user.badges.clone(),
                total_issues,
                total_upvotes,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        rank_order(
            RankKey {
                total_upvotes: a.total_upvotes,
                total_issues: a.total_issues,
                user_id: &a.user_id,
            },
            RankKey {
                total_upvotes: b.total_upvotes,
                total_issues: b.total_issues,
                user_id: &b.user_id,
            },
        )
    });
    entries.truncate(limit);
    entries
}
