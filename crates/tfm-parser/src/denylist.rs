//! Denylist of code-shaped engineering shorthand.
//!
//! The component grammar also matches diameter callouts (`DN50`), screw sizes
//! (`M10`), dimension pairs (`600X400`) and ratings (`IP54`, `PN16`, `EI60`).
//! Scanning keeps them; this filter removes them afterwards so raw output can
//! still be reviewed.

use std::sync::LazyLock;

use regex::Regex;
use tfm_types::Occurrence;

/// Named denylist patterns, matched against the uppercased code with whitespace removed.
pub const DENYLIST_PATTERNS: &[(&str, &str)] = &[
    ("diameter", r"^(?:DN|NS)\d+$"),
    ("pressure rating", r"^PN\d+$"),
    ("ingress rating", r"^IP\d{2}$"),
    ("fire rating", r"^R?EI\d+$"),
    ("screw size", r"^M\d+(?:X\d+)?$"),
    ("dimension", r"^\d+X\d+(?:X\d+)?$"),
];

static DENYLIST: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    DENYLIST_PATTERNS
        .iter()
        .map(|(name, pattern)| (*name, Regex::new(pattern).expect("valid denylist pattern")))
        .collect()
});

/// Returns the name of the denylist pattern `code` matches, if any.
pub fn denylist_reason(code: &str) -> Option<&'static str> {
    let key: String = code
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    DENYLIST
        .iter()
        .find(|(_, re)| re.is_match(&key))
        .map(|(name, _)| *name)
}

/// Returns true if `code` is engineering shorthand rather than a component.
///
/// # Examples
///
/// ```
/// use tfm_parser::is_denylisted;
///
/// assert!(is_denylisted("DN50"));
/// assert!(is_denylisted("600x400"));
/// assert!(!is_denylisted("RTA4001"));
/// ```
pub fn is_denylisted(code: &str) -> bool {
    denylist_reason(code).is_some()
}

/// Drops occurrences whose code is denylisted.
pub fn retain_real_components(occurrences: Vec<Occurrence>) -> Vec<Occurrence> {
    occurrences
        .into_iter()
        .filter(|o| !is_denylisted(&o.code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::is_valid_component;
    use tfm_types::MatchKind;

    #[test]
    fn test_denylist_matches_shorthand() {
        for code in ["DN50", "dn100", "NS32", "PN16", "IP54", "EI60", "REI90", "M10", "M8x40", "600X400", "600 x 400", "30x20x10"] {
            assert!(is_denylisted(code), "{code} should be denylisted");
        }
    }

    #[test]
    fn test_denylist_keeps_components() {
        for code in ["RTA4001", "AA000/000", "DNA50", "KA001", "IPA12", "LB10"] {
            assert!(!is_denylisted(code), "{code} should not be denylisted");
        }
    }

    #[test]
    fn test_denylisted_codes_match_component_grammar() {
        for code in ["DN50", "PN16", "IP54", "EI60"] {
            assert!(is_valid_component(code));
        }
    }

    #[test]
    fn test_denylist_reason() {
        assert_eq!(denylist_reason("DN50"), Some("diameter"));
        assert_eq!(denylist_reason("M10"), Some("screw size"));
        assert_eq!(denylist_reason("RTA001"), None);
    }

    #[test]
    fn test_retain_real_components() {
        let occurrences = vec![
            Occurrence::new("DN50", MatchKind::Context),
            Occurrence::new("RTA001", MatchKind::Context),
            Occurrence::new("IP54", MatchKind::Default),
        ];
        let kept = retain_real_components(occurrences);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].code, "RTA001");
    }
}
