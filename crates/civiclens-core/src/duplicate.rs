//! Duplicate-title matching.
//!
//! Two titles name the same report when their normalized forms are
//! identical: trimmed, case folded, internal whitespace collapsed to single
//! spaces. Matching is exact after normalization; there is no fuzzy or
//! prefix matching.

/// Radius inside which a same-titled issue counts as a duplicate.
pub const DEFAULT_DUPLICATE_RADIUS_METERS: f64 = 100.0;

/// Normalize a title for comparison.
pub fn normalize_title(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether two titles collide under normalization.
pub fn titles_match(a: &str, b: &str) -> bool {
    normalize_title(a) == normalize_title(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_folds_case_and_whitespace() {
        assert_eq!(normalize_title("  Broken   Street\tLight "), "broken street light");
        assert_eq!(normalize_title("broken street light"), "broken street light");
    }

    #[test]
    fn trailing_space_and_case_still_match() {
        assert!(titles_match("Broken Light", "broken light "));
        assert!(titles_match("BROKEN  LIGHT", "broken light"));
    }

    #[test]
    fn different_wording_does_not_match() {
        assert!(!titles_match("Broken Light", "Broken Lights"));
        assert!(!titles_match("Broken Light", "Broken Light Pole"));
    }
}
