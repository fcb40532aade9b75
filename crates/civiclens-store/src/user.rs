//! User profile rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user profile as the engagement core sees it.
///
/// Identity (credentials, sessions) lives outside this system; any actor id
/// handed to an operation is trusted. This row carries the display data the
/// leaderboard reads and the trust score engagement actions award into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub trust_score: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<String>,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

impl User {
    /// Build a fresh profile with a generated id and a seeded avatar URL.
    pub fn new(username: impl Into<String>, now: DateTime<Utc>) -> User {
        let username = username.into();
        let avatar = format!("https://api.dicebear.com/7.x/avataaars/svg?seed={username}");
        User {
            id: Uuid::new_v4().to_string(),
            username,
            avatar: Some(avatar),
            trust_score: 0,
            badges: Vec::new(),
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_profiles_start_unscored_with_seeded_avatar() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let user = User::new("casey_r", now);

        assert_eq!(user.trust_score, 0);
        assert!(user.badges.is_empty());
        assert_eq!(
            user.avatar.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=casey_r")
        );
        assert_eq!(user.created_at, now);
    }

    #[test]
    fn missing_optional_fields_deserialize_with_defaults() {
        let raw = r#"{"id":"u-1","username":"casey","created_at":"2025-06-01T12:00:00Z"}"#;
        let user: User = serde_json::from_str(raw).expect("must parse");
        assert_eq!(user.trust_score, 0);
        assert!(user.avatar.is_none());
        assert!(user.badges.is_empty());
    }
}
