//! Engagement policy knobs and their TOML source.
//!
//! Operations never hardcode tunables. They take an
//! [`EngagementPolicy`], which deployments can override from a
//! `[engagement]` table in a TOML file. Missing keys keep their
//! defaults; present keys must be well typed and in range.

use std::path::Path;

use civiclens_core::DEFAULT_DUPLICATE_RADIUS_METERS;

/// Trust points a reporter earns per accepted report.
pub const DEFAULT_TRUST_AWARD_ISSUE_REPORTED: i64 = 5;

/// Default page size for notification listings.
pub const DEFAULT_NOTIFICATION_PAGE_LIMIT: i64 = 50;

/// Tunables for the engagement operations.
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementPolicy {
    /// Radius inside which a same-titled report counts as a duplicate.
    pub duplicate_radius_meters: f64,
    /// Trust points awarded to the reporter when a report is accepted.
    pub trust_award_issue_reported: i64,
    /// Page size used when a notification listing does not name one.
    pub notification_page_limit: i64,
}

impl Default for EngagementPolicy {
    fn default() -> Self {
        Self {
            duplicate_radius_meters: DEFAULT_DUPLICATE_RADIUS_METERS,
            trust_award_issue_reported: DEFAULT_TRUST_AWARD_ISSUE_REPORTED,
            notification_page_limit: DEFAULT_NOTIFICATION_PAGE_LIMIT,
        }
    }
}

/// Why a policy file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read policy file {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse policy file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("invalid policy value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Load an [`EngagementPolicy`] from a TOML file.
///
/// The file may carry an `[engagement]` table; anything else in it is
/// ignored. A file without that table yields the defaults.
pub fn load_policy_toml(path: impl AsRef<Path>) -> Result<EngagementPolicy, PolicyError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|err| PolicyError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    let parsed: toml::Value = text.parse().map_err(|source| PolicyError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    policy_from_value(&parsed)
}

fn policy_from_value(parsed: &toml::Value) -> Result<EngagementPolicy, PolicyError> {
    let mut policy = EngagementPolicy::default();
    let Some(table) = parsed.get("engagement").and_then(toml::Value::as_table) else {
        return Ok(policy);
    };

    if let Some(value) = table.get("duplicate_radius_meters") {
        let radius = value
            .as_float()
            .or_else(|| value.as_integer().map(|whole| whole as f64))
            .ok_or_else(|| invalid("duplicate_radius_meters", "must be a number"))?;
        if radius <= 0.0 {
            return Err(invalid("duplicate_radius_meters", "must be positive"));
        }
        policy.duplicate_radius_meters = radius;
    }

    if let Some(value) = table.get("trust_award_issue_reported") {
        let award = value
            .as_integer()
            .ok_or_else(|| invalid("trust_award_issue_reported", "must be an integer"))?;
        if award < 0 {
            return Err(invalid("trust_award_issue_reported", "must not be negative"));
        }
        policy.trust_award_issue_reported = award;
    }

    if let Some(value) = table.get("notification_page_limit") {
        let limit = value
            .as_integer()
            .ok_or_else(|| invalid("notification_page_limit", "must be an integer"))?;
        if limit <= 0 {
            return Err(invalid("notification_page_limit", "must be positive"));
        }
        policy.notification_page_limit = limit;
    }

    Ok(policy)
}

fn invalid(key: &str, message: &str) -> PolicyError {
    PolicyError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<EngagementPolicy, PolicyError> {
        let parsed: toml::Value = text.parse().expect("test toml must parse");
        policy_from_value(&parsed)
    }

    #[test]
    fn empty_document_yields_defaults() {
        let policy = parse("").expect("empty policy");
        assert_eq!(policy, EngagementPolicy::default());
        assert_eq!(policy.duplicate_radius_meters, 100.0);
        assert_eq!(policy.trust_award_issue_reported, 5);
    }

    #[test]
    fn engagement_table_overrides_named_keys_only() {
        let policy = parse(
            "[engagement]\nduplicate_radius_meters = 250.0\nnotification_page_limit = 10\n",
        )
        .expect("valid policy");
        assert_eq!(policy.duplicate_radius_meters, 250.0);
        assert_eq!(policy.notification_page_limit, 10);
        assert_eq!(policy.trust_award_issue_reported, 5);
    }

    #[test]
    fn integer_radius_is_accepted_as_meters() {
        let policy = parse("[engagement]\nduplicate_radius_meters = 75\n").expect("valid policy");
        assert_eq!(policy.duplicate_radius_meters, 75.0);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = parse("[engagement]\nduplicate_radius_meters = 0.0\n")
            .expect_err("zero radius must fail");
        assert!(matches!(
            err,
            PolicyError::InvalidValue { ref key, .. } if key == "duplicate_radius_meters"
        ));

        let err = parse("[engagement]\nnotification_page_limit = -3\n")
            .expect_err("negative page limit must fail");
        assert!(matches!(
            err,
            PolicyError::InvalidValue { ref key, .. } if key == "notification_page_limit"
        ));
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = parse("[engagement]\ntrust_award_issue_reported = \"five\"\n")
            .expect_err("string award must fail");
        assert!(matches!(
            err,
            PolicyError::InvalidValue { ref key, .. } if key == "trust_award_issue_reported"
        ));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let missing = std::env::temp_dir().join("civiclens-policy-missing.toml");
        let err = load_policy_toml(&missing).expect_err("missing file must fail");
        assert!(matches!(err, PolicyError::Io { .. }));
    }
}
