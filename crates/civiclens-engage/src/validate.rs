//! Input checks at the operation edge.
//!
//! Free text is stripped of markup tags and trimmed before any length
//! check, so a report padded with `<b>` tags cannot sneak under or over
//! a bound. Length bounds count chars, not bytes.

use std::sync::OnceLock;

use civiclens_core::GeoPoint;
use regex::Regex;

use crate::error::EngageError;

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const COMMENT_MIN_CHARS: usize = 1;
pub const COMMENT_MAX_CHARS: usize = 1000;
pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 50;

fn markup_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("markup-tag regex must compile"))
}

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("username regex must compile"))
}

/// Drop markup tags and surrounding whitespace from free text.
pub fn sanitize_text(raw: &str) -> String {
    markup_tag_re().replace_all(raw, "").trim().to_string()
}

/// Sanitized title, length-checked against the submission bounds.
pub fn clean_title(raw: &str) -> Result<String, EngageError> {
    let cleaned = sanitize_text(raw);
    let chars = cleaned.chars().count();
    if chars < TITLE_MIN_CHARS || chars > TITLE_MAX_CHARS {
        return Err(EngageError::Validation(format!(
            "title must be {TITLE_MIN_CHARS} to {TITLE_MAX_CHARS} characters, got {chars}"
        )));
    }
    Ok(cleaned)
}

/// Sanitized description, at least the minimum length.
pub fn clean_description(raw: &str) -> Result<String, EngageError> {
    let cleaned = sanitize_text(raw);
    let chars = cleaned.chars().count();
    if chars < DESCRIPTION_MIN_CHARS {
        return Err(EngageError::Validation(format!(
            "description must be at least {DESCRIPTION_MIN_CHARS} characters, got {chars}"
        )));
    }
    Ok(cleaned)
}

/// Sanitized comment body within the submission bounds.
pub fn clean_comment_body(raw: &str) -> Result<String, EngageError> {
    let cleaned = sanitize_text(raw);
    let chars = cleaned.chars().count();
    if chars < COMMENT_MIN_CHARS || chars > COMMENT_MAX_CHARS {
        return Err(EngageError::Validation(format!(
            "comment must be {COMMENT_MIN_CHARS} to {COMMENT_MAX_CHARS} characters, got {chars}"
        )));
    }
    Ok(cleaned)
}

/// Category label: sanitized and non-empty.
pub fn clean_category(raw: &str) -> Result<String, EngageError> {
    let cleaned = sanitize_text(raw);
    if cleaned.is_empty() {
        return Err(EngageError::Validation(
            "category must not be empty".to_string(),
        ));
    }
    Ok(cleaned)
}

/// Optional free text: sanitized, with empty collapsing to `None`.
pub fn clean_optional_text(raw: Option<&str>) -> Option<String> {
    let cleaned = sanitize_text(raw?);
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Username: trimmed, bounded, and limited to letters, digits,
/// underscores, and hyphens.
pub fn clean_username(raw: &str) -> Result<String, EngageError> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();
    if chars < USERNAME_MIN_CHARS || chars > USERNAME_MAX_CHARS {
        return Err(EngageError::Validation(format!(
            "username must be {USERNAME_MIN_CHARS} to {USERNAME_MAX_CHARS} characters, got {chars}"
        )));
    }
    if !username_re().is_match(trimmed) {
        return Err(EngageError::Validation(
            "username may only contain letters, numbers, underscores and hyphens".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Coordinates must sit on the globe.
pub fn check_location(point: GeoPoint) -> Result<GeoPoint, EngageError> {
    if !point.in_bounds() {
        return Err(EngageError::Validation(format!(
            "coordinates out of range: latitude {}, longitude {}",
            point.latitude, point.longitude
        )));
    }
    Ok(point)
}

/// Page limits must be positive; the value flows into `take`.
pub fn check_page_limit(limit: i64) -> Result<usize, EngageError> {
    if limit <= 0 {
        return Err(EngageError::Validation(format!(
            "limit must be positive, got {limit}"
        )));
    }
    Ok(limit as usize)
}
