//! Leaderboard ordering.

use std::cmp::Ordering;

/// Ranking facts for one user, borrowed from whatever row holds them.
#[derive(Debug, Clone, Copy)]
pub struct RankKey<'a> {
    pub total_upvotes: i64,
    pub total_issues: i64,
    pub user_id: &'a str,
}

/// Leaderboard order: upvotes descending, then reported-issue count
/// descending, then user id ascending so equal rows always land in the
/// same order.
pub fn rank_order(a: RankKey<'_>, b: RankKey<'_>) -> Ordering {
    b.total_upvotes
        .cmp(&a.total_upvotes)
        .then_with(|| b.total_issues.cmp(&a.total_issues))
        .then_with(|| a.user_id.cmp(b.user_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(upvotes: i64, issues: i64, user_id: &str) -> RankKey<'_> {
        RankKey { total_upvotes: upvotes, total_issues: issues, user_id }
    }

    #[test]
    fn more_upvotes_ranks_first() {
        assert_eq!(rank_order(key(10, 1, "b"), key(3, 9, "a")), Ordering::Less);
    }

    #[test]
    fn issue_count_breaks_upvote_ties() {
        assert_eq!(rank_order(key(5, 4, "b"), key(5, 2, "a")), Ordering::Less);
    }

    #[test]
    fn user_id_breaks_full_ties_deterministically() {
        assert_eq!(rank_order(key(5, 2, "alice"), key(5, 2, "bob")), Ordering::Less);
        assert_eq!(rank_order(key(5, 2, "bob"), key(5, 2, "alice")), Ordering::Greater);
        assert_eq!(rank_order(key(5, 2, "alice"), key(5, 2, "alice")), Ordering::Equal);
    }

    #[test]
    fn sorting_a_shuffled_list_is_stable_across_runs() {
        let mut rows = vec![
            key(2, 1, "carol"),
            key(5, 2, "bob"),
            key(5, 2, "alice"),
            key(0, 0, "dave"),
            key(5, 3, "erin"),
        ];
        rows.sort_by(|a, b| rank_order(*a, *b));

        let order: Vec<&str> = rows.iter().map(|k| k.user_id).collect();
        assert_eq!(order, vec!["erin", "alice", "bob", "carol", "dave"]);
    }
}
