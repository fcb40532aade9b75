//! Deterministic engagement-state contract checking.
//!
//! The vote counts on an issue row are a derived cache. This check
//! recomputes them from the vote rows and reports any drift, plus rows
//! whose references dangle. Accepted output means the store could have
//! been produced purely by ledger operations.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::memory::StateStore;

pub const ENGAGEMENT_CHECK_KIND: &str = "civiclens.engagement.check.v1";

pub const FAILURE_CLASS_UPVOTE_DRIFT: &str = "engagement.counts.upvote_drift";
pub const FAILURE_CLASS_DOWNVOTE_DRIFT: &str = "engagement.counts.downvote_drift";
pub const FAILURE_CLASS_VOTE_ORPHAN_ISSUE: &str = "engagement.votes.orphan_issue";
pub const FAILURE_CLASS_VOTE_ORPHAN_VOTER: &str = "engagement.votes.orphan_voter";
pub const WARNING_CLASS_NOTIFICATION_ORPHAN_RECIPIENT: &str =
    "engagement.notifications.orphan_recipient";
pub const WARNING_CLASS_COMMENT_ORPHAN_ISSUE: &str = "engagement.comments.orphan_issue";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngagementFinding {
    pub subject_id: String,
    pub class: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSummary {
    pub user_count: usize,
    pub issue_count: usize,
    pub vote_count: usize,
    pub notification_count: usize,
    pub comment_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngagementCheckReport {
    pub check_kind: String,
    pub result: String,
    pub failure_classes: Vec<String>,
    pub warning_classes: Vec<String>,
    pub errors: Vec<EngagementFinding>,
    pub warnings: Vec<EngagementFinding>,
    pub summary: EngagementSummary,
}

impl EngagementCheckReport {
    pub fn accepted(&self) -> bool {
        self.result == "accepted"
    }
}

fn collect_classes(findings: &[EngagementFinding]) -> Vec<String> {
    findings
        .iter()
        .map(|finding| finding.class.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn check_engagement_state(store: &StateStore) -> EngagementCheckReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut tallies: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for vote in store.votes() {
        let entry = tallies.entry(vote.issue_id.as_str()).or_insert((0, 0));
        match vote.kind {
            civiclens_core::VoteKind::Upvote => entry.0 += 1,
            civiclens_core::VoteKind::Downvote => entry.1 += 1,
        }

        if store.issue(&vote.issue_id).is_none() {
            errors.push(EngagementFinding {
                subject_id: vote.id.clone(),
                class: FAILURE_CLASS_VOTE_ORPHAN_ISSUE.to_string(),
                message: format!("vote references missing issue {}", vote.issue_id),
            });
        }
        if store.user(&vote.voter_id).is_none() {
            errors.push(EngagementFinding {
                subject_id: vote.id.clone(),
                class: FAILURE_CLASS_VOTE_ORPHAN_VOTER.to_string(),
                message: format!("vote references missing voter {}", vote.voter_id),
            });
        }
    }

    for issue in store.issues() {
        let (expected_up, expected_down) =
            tallies.get(issue.id.as_str()).copied().unwrap_or((0, 0));
        if issue.upvotes != expected_up {
            errors.push(EngagementFinding {
                subject_id: issue.id.clone(),
                class: FAILURE_CLASS_UPVOTE_DRIFT.to_string(),
                message: format!(
                    "cached upvotes={} but {} live upvote row(s) exist",
                    issue.upvotes, expected_up
                ),
            });
        }
        if issue.downvotes != expected_down {
            errors.push(EngagementFinding {
                subject_id: issue.id.clone(),
                class: FAILURE_CLASS_DOWNVOTE_DRIFT.to_string(),
                message: format!(
                    "cached downvotes={} but {} live downvote row(s) exist",
                    issue.downvotes, expected_down
                ),
            });
        }
    }

    for notification in store.notifications() {
        if store.user(&notification.recipient_id).is_none() {
            warnings.push(EngagementFinding {
                subject_id: notification.id.clone(),
                class: WARNING_CLASS_NOTIFICATION_ORPHAN_RECIPIENT.to_string(),
                message: format!(
                    "notification addressed to missing recipient {}",
                    notification.recipient_id
                ),
            });
        }
    }

    for comment in store.comments() {
        if store.issue(&comment.issue_id).is_none() {
            warnings.push(EngagementFinding {
                subject_id: comment.id.clone(),
                class: WARNING_CLASS_COMMENT_ORPHAN_ISSUE.to_string(),
                message: format!("comment references missing issue {}", comment.issue_id),
            });
        }
    }

    let result = if errors.is_empty() {
        "accepted"
    } else {
        "rejected"
    };

    EngagementCheckReport {
        check_kind: ENGAGEMENT_CHECK_KIND.to_string(),
        result: result.to_string(),
        failure_classes: collect_classes(&errors),
        warning_classes: collect_classes(&warnings),
        summary: EngagementSummary {
            user_count: store.user_count(),
            issue_count: store.issue_count(),
            vote_count: store.vote_count(),
            notification_count: store.notification_count(),
            comment_count: store.comment_count(),
            error_count: errors.len(),
            warning_count: warnings.len(),
        },
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Issue;
    use crate::user::User;
    use crate::vote::Vote;
    use chrono::{DateTime, TimeZone, Utc};
    use civiclens_core::{GeoPoint, VoteKind};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn seeded_store() -> (StateStore, String, String) {
        let mut store = StateStore::default();
        let reporter = User::new("reporter", fixed_now());
        let voter = User::new("voter", fixed_now());
        let reporter_id = reporter.id.clone();
        let voter_id = voter.id.clone();
        store.insert_user(reporter).expect("reporter inserts");
        store.insert_user(voter).expect("voter inserts");

        let mut issue = Issue::new(
            "Broken Light",
            "The street light is out.",
            "lighting",
            &reporter_id,
            GeoPoint::new(40.7128, -74.0060),
            fixed_now(),
        );
        issue.apply_vote_deltas(1, 0);
        let issue_id = issue.id.clone();
        store.upsert_issue(issue);
        store.set_vote(Vote::new(&issue_id, &voter_id, VoteKind::Upvote, fixed_now()));

        (store, issue_id, voter_id)
    }

    #[test]
    fn consistent_state_is_accepted() {
        let (store, _, _) = seeded_store();
        let report = check_engagement_state(&store);
        assert!(report.accepted(), "unexpected findings: {:?}", report.errors);
        assert_eq!(report.summary.error_count, 0);
    }

    #[test]
    fn drifted_counts_are_rejected_with_the_drift_class() {
        let (mut store, issue_id, _) = seeded_store();
        store
            .issue_mut(&issue_id)
            .expect("issue exists")
            .upvotes = 7;

        let report = check_engagement_state(&store);
        assert!(!report.accepted());
        assert!(
            report
                .failure_classes
                .contains(&FAILURE_CLASS_UPVOTE_DRIFT.to_string())
        );
    }

    #[test]
    fn votes_on_missing_issues_are_rejected() {
        let (mut store, _, voter_id) = seeded_store();
        store.set_vote(Vote::new("ghost", &voter_id, VoteKind::Downvote, fixed_now()));

        let report = check_engagement_state(&store);
        assert!(!report.accepted());
        assert!(
            report
                .failure_classes
                .contains(&FAILURE_CLASS_VOTE_ORPHAN_ISSUE.to_string())
        );
    }

    #[test]
    fn orphan_notifications_warn_without_rejecting() {
        let (mut store, _, _) = seeded_store();
        store.insert_notification(crate::notification::Notification::from_draft(
            civiclens_core::NotificationDraft {
                recipient_id: "ghost".to_string(),
                kind: civiclens_core::NotificationKind::Reactions,
                title: "New Upvote".to_string(),
                message: "stale".to_string(),
            },
            fixed_now(),
        ));

        let report = check_engagement_state(&store);
        assert!(report.accepted());
        assert_eq!(report.summary.warning_count, 1);
        assert!(
            report
                .warning_classes
                .contains(&WARNING_CLASS_NOTIFICATION_ORPHAN_RECIPIENT.to_string())
        );
    }
}
