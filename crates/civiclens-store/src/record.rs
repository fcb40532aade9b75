//! The tagged record envelope: one JSONL file carries every row type.

use serde::{Deserialize, Serialize};

use crate::comment::Comment;
use crate::issue::Issue;
use crate::notification::Notification;
use crate::user::User;
use crate::vote::Vote;

/// One line of the state file.
///
/// Internally tagged so each line stays a flat JSON object with a `record`
/// discriminator next to the row's own fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record {
    User(User),
    Issue(Issue),
    Vote(Vote),
    Notification(Notification),
    Comment(Comment),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use civiclens_core::VoteKind;

    #[test]
    fn lines_carry_the_record_tag() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let record = Record::Vote(Vote::new("i-1", "u-1", VoteKind::Upvote, now));

        let line = serde_json::to_string(&record).expect("must serialize");
        assert!(line.contains("\"record\":\"vote\""));
        assert!(line.contains("\"issue_id\":\"i-1\""));

        let back: Record = serde_json::from_str(&line).expect("must parse");
        assert!(matches!(back, Record::Vote(v) if v.voter_id == "u-1"));
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let raw = r#"{"record":"reaction","id":"x"}"#;
        let parsed: Result<Record, _> = serde_json::from_str(raw);
        assert!(parsed.is_err());
    }
}
