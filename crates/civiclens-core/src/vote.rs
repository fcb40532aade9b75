//! The vote state machine.
//!
//! A voter holds at most one live vote per issue. Casting is a toggle:
//! repeating the held kind removes it, casting the other kind switches it.
//! The transition also yields the count deltas for the issue's cached
//! tallies, so the row mutation and the count mutation always agree.

use serde::{Deserialize, Serialize};

/// Kind of a cast vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteKind {
    Upvote,
    Downvote,
}

impl VoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteKind::Upvote => "upvote",
            VoteKind::Downvote => "downvote",
        }
    }

    pub fn parse(raw: &str) -> Option<VoteKind> {
        match raw.trim().to_lowercase().as_str() {
            "upvote" | "up" => Some(VoteKind::Upvote),
            "downvote" | "down" => Some(VoteKind::Downvote),
            _ => None,
        }
    }
}

impl std::fmt::Display for VoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a cast did to the voter's standing vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteAction {
    Added,
    Removed,
    Switched,
}

impl VoteAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteAction::Added => "added",
            VoteAction::Removed => "removed",
            VoteAction::Switched => "switched",
        }
    }
}

/// Outcome of applying one cast against a voter's previous standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub action: VoteAction,
    /// The standing vote after the cast. `None` when the cast toggled it off.
    pub next: Option<VoteKind>,
    pub upvote_delta: i64,
    pub downvote_delta: i64,
}

/// Apply one cast. Total over all `(previous, cast)` pairs; never rejects.
pub fn apply_vote(previous: Option<VoteKind>, cast: VoteKind) -> VoteTransition {
    match previous {
        None => {
            let (up, down) = deltas(cast, 1);
            VoteTransition {
                action: VoteAction::Added,
                next: Some(cast),
                upvote_delta: up,
                downvote_delta: down,
            }
        }
        Some(held) if held == cast => {
            let (up, down) = deltas(held, -1);
            VoteTransition {
                action: VoteAction::Removed,
                next: None,
                upvote_delta: up,
                downvote_delta: down,
            }
        }
        Some(held) => {
            let (up_off, down_off) = deltas(held, -1);
            let (up_on, down_on) = deltas(cast, 1);
            VoteTransition {
                action: VoteAction::Switched,
                next: Some(cast),
                upvote_delta: up_off + up_on,
                downvote_delta: down_off + down_on,
            }
        }
    }
}

fn deltas(kind: VoteKind, amount: i64) -> (i64, i64) {
    match kind {
        VoteKind::Upvote => (amount, 0),
        VoteKind::Downvote => (0, amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cast_adds() {
        let t = apply_vote(None, VoteKind::Upvote);
        assert_eq!(t.action, VoteAction::Added);
        assert_eq!(t.next, Some(VoteKind::Upvote));
        assert_eq!((t.upvote_delta, t.downvote_delta), (1, 0));
    }

    #[test]
    fn repeating_the_held_kind_removes() {
        let t = apply_vote(Some(VoteKind::Downvote), VoteKind::Downvote);
        assert_eq!(t.action, VoteAction::Removed);
        assert_eq!(t.next, None);
        assert_eq!((t.upvote_delta, t.downvote_delta), (0, -1));
    }

    #[test]
    fn opposite_cast_switches_both_counts() {
        let t = apply_vote(Some(VoteKind::Upvote), VoteKind::Downvote);
        assert_eq!(t.action, VoteAction::Switched);
        assert_eq!(t.next, Some(VoteKind::Downvote));
        assert_eq!((t.upvote_delta, t.downvote_delta), (-1, 1));
    }

    #[test]
    fn toggle_then_toggle_nets_to_zero() {
        let first = apply_vote(None, VoteKind::Upvote);
        let second = apply_vote(first.next, VoteKind::Upvote);
        assert_eq!(first.upvote_delta + second.upvote_delta, 0);
        assert_eq!(second.next, None);
    }

    #[test]
    fn up_then_down_then_down_walks_counts_correctly() {
        let mut up = 0i64;
        let mut down = 0i64;
        let mut standing = None;

        for cast in [VoteKind::Upvote, VoteKind::Downvote, VoteKind::Downvote] {
            let t = apply_vote(standing, cast);
            up += t.upvote_delta;
            down += t.downvote_delta;
            standing = t.next;
        }

        assert_eq!((up, down), (0, 0));
        assert_eq!(standing, None);
    }

    #[test]
    fn parse_accepts_short_forms() {
        assert_eq!(VoteKind::parse("up"), Some(VoteKind::Upvote));
        assert_eq!(VoteKind::parse("DOWNVOTE"), Some(VoteKind::Downvote));
        assert_eq!(VoteKind::parse("sideways"), None);
    }
}
