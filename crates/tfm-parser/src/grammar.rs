//! TFM segment grammar.
//!
//! Each segment has one pattern, declared once in [`SEGMENT_PATTERNS`]. The
//! composed patterns used for scanning (full inline code, structured code,
//! bare system, bare component) are built from those.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tfm_types::{Segment, SegmentSet};

/// Building number: digits only.
pub const BUILDING_PATTERN: &str = r"\d+";

/// System code: `NNN.NNN` with 3-4 digits per group and an optional `:NN` suffix.
pub const SYSTEM_PATTERN: &str = r"\d{3,4}\.\d{3,4}(?::\d{2,4})?";

/// Component code: 2-3 letters, digits, then optional alphanumerics, `/`, `_`, `-`.
pub const COMPONENT_PATTERN: &str = r"[A-Za-z]{2,3}\d+[A-Za-z0-9/_\-]*";

/// Type code: 2-3 letters.
pub const TYPECODE_PATTERN: &str = r"[A-Za-z]{2,3}";

/// Component as it is matched inside free text.
///
/// Same shape as [`COMPONENT_PATTERN`] but never ends on a separator, so a
/// trailing `-` or `/` in prose is not swallowed.
const COMPONENT_MENTION_PATTERN: &str = r"[A-Za-z]{2,3}\d+(?:[A-Za-z0-9/_\-]*[A-Za-z0-9])?";

/// A named single-segment pattern.
#[derive(Debug, Clone, Copy)]
pub struct SegmentPattern {
    /// The segment the pattern describes.
    pub segment: Segment,
    /// Unanchored regular expression.
    pub pattern: &'static str,
}

/// Pattern table, one entry per segment in written order.
pub const SEGMENT_PATTERNS: [SegmentPattern; 4] = [
    SegmentPattern {
        segment: Segment::Building,
        pattern: BUILDING_PATTERN,
    },
    SegmentPattern {
        segment: Segment::System,
        pattern: SYSTEM_PATTERN,
    },
    SegmentPattern {
        segment: Segment::Component,
        pattern: COMPONENT_PATTERN,
    },
    SegmentPattern {
        segment: Segment::Typecode,
        pattern: TYPECODE_PATTERN,
    },
];

static SEGMENT_VALIDATORS: LazyLock<Vec<(Segment, Regex)>> = LazyLock::new(|| {
    SEGMENT_PATTERNS
        .iter()
        .map(|p| {
            let anchored = format!("^{}$", p.pattern);
            (p.segment, Regex::new(&anchored).expect("valid segment pattern"))
        })
        .collect()
});

/// `+B=S-C%T` inside free text. Building and type code are optional.
static FULL_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:\+(?P<building>{BUILDING_PATTERN}))?=(?P<system>{SYSTEM_PATTERN})-(?P<component>{COMPONENT_MENTION_PATTERN})(?:%(?P<typecode>{TYPECODE_PATTERN})\b)?"
    ))
    .expect("valid full code regex")
});

/// One isolated code, anchored at both ends.
static SINGLE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(?:\+(?P<building>{BUILDING_PATTERN}))?=(?P<system>{SYSTEM_PATTERN})-(?P<component>{COMPONENT_PATTERN})(?:%(?P<typecode>{TYPECODE_PATTERN}))?\s*$"
    ))
    .expect("valid single code regex")
});

/// A system code with an optional `+B=` building prefix.
static SYSTEM_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:\+(?P<building>{BUILDING_PATTERN})=)?\b(?P<system>{SYSTEM_PATTERN})\b"
    ))
    .expect("valid system mention regex")
});

/// A bare component code.
static COMPONENT_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?P<component>{COMPONENT_MENTION_PATTERN})"))
        .expect("valid component mention regex")
});

/// A `%xx` type code directly after a component.
static TYPECODE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*%(?P<typecode>{TYPECODE_PATTERN})\b"))
        .expect("valid typecode suffix regex")
});

/// A code anchored on its system, with every other segment optional.
static STRUCTURED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:\+(?P<building>{BUILDING_PATTERN}))?=?\b(?P<system>{SYSTEM_PATTERN})\b(?:-(?P<component>{COMPONENT_MENTION_PATTERN}))?(?:%(?P<typecode>{TYPECODE_PATTERN})\b)?"
    ))
    .expect("valid structured code regex")
});

/// Full inline code pattern (`+B=S-C%T`, building and type code optional).
pub fn full_code_regex() -> &'static Regex {
    &FULL_CODE_RE
}

/// Bare system pattern with optional building prefix.
pub fn system_mention_regex() -> &'static Regex {
    &SYSTEM_MENTION_RE
}

/// Bare component pattern.
pub fn component_mention_regex() -> &'static Regex {
    &COMPONENT_MENTION_RE
}

/// Type code directly following a component (`%AB`).
pub fn typecode_suffix_regex() -> &'static Regex {
    &TYPECODE_SUFFIX_RE
}

/// System-anchored structured pattern used by the configurable extractor.
pub fn structured_regex() -> &'static Regex {
    &STRUCTURED_RE
}

/// Returns true if `value` is a complete, valid value for `segment`.
pub fn is_valid_segment(segment: Segment, value: &str) -> bool {
    SEGMENT_VALIDATORS
        .iter()
        .find(|(s, _)| *s == segment)
        .is_some_and(|(_, re)| re.is_match(value))
}

/// Returns true if `value` is a valid building number.
pub fn is_valid_building(value: &str) -> bool {
    is_valid_segment(Segment::Building, value)
}

/// Returns true if `value` is a valid system code.
pub fn is_valid_system(value: &str) -> bool {
    is_valid_segment(Segment::System, value)
}

/// Returns true if `value` is a valid component code.
pub fn is_valid_component(value: &str) -> bool {
    is_valid_segment(Segment::Component, value)
}

/// Returns true if `value` is a valid type code.
pub fn is_valid_typecode(value: &str) -> bool {
    is_valid_segment(Segment::Typecode, value)
}

/// Parses one isolated code into its segments.
///
/// Uses the same grammar as the inline pass of the document scanner, anchored
/// to the whole string. Returns `None` if the string is not a full code.
///
/// # Examples
///
/// ```
/// use tfm_parser::parse_single_code;
///
/// let set = parse_single_code("+1234=360.001-RTA001%AB").unwrap();
/// assert_eq!(set.building.as_deref(), Some("1234"));
/// assert_eq!(set.system.as_deref(), Some("360.001"));
/// assert_eq!(set.component.as_deref(), Some("RTA001"));
/// assert_eq!(set.typecode.as_deref(), Some("AB"));
///
/// assert!(parse_single_code("RTA001").is_none());
/// ```
pub fn parse_single_code(code: &str) -> Option<SegmentSet> {
    SINGLE_CODE_RE.captures(code).map(|caps| segments_from(&caps))
}

/// Copies the named segment groups out of a match.
pub(crate) fn segments_from(caps: &Captures<'_>) -> SegmentSet {
    let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
    SegmentSet {
        building: group("building"),
        system: group("system"),
        component: group("component"),
        typecode: group("typecode"),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const BUILDING: &str = "[0-9]{1,6}";
    const SYSTEM: &str = "[0-9]{3,4}\\.[0-9]{3,4}(:[0-9]{2,4})?";
    const COMPONENT: &str = "[A-Za-z]{2,3}[0-9]{1,5}[A-Za-z0-9/_-]{0,6}";
    const TYPECODE: &str = "[A-Za-z]{2,3}";

    proptest! {
        /// Every generated segment passes its own validator.
        #[test]
        fn test_generated_segments_are_valid(
            b in BUILDING,
            s in SYSTEM,
            c in COMPONENT,
            t in TYPECODE,
        ) {
            prop_assert!(is_valid_building(&b));
            prop_assert!(is_valid_system(&s));
            prop_assert!(is_valid_component(&c));
            prop_assert!(is_valid_typecode(&t));
        }

        /// A composed full code parses back into exactly its segments.
        #[test]
        fn test_composed_code_round_trips(
            b in BUILDING,
            s in SYSTEM,
            c in COMPONENT,
            t in TYPECODE,
        ) {
            let code = format!("+{b}={s}-{c}%{t}");
            let set = parse_single_code(&code);
            prop_assert!(set.is_some(), "no match for {}", code);
            let set = set.unwrap();
            prop_assert_eq!(set.building.as_deref(), Some(b.as_str()));
            prop_assert_eq!(set.system.as_deref(), Some(s.as_str()));
            prop_assert_eq!(set.component.as_deref(), Some(c.as_str()));
            prop_assert_eq!(set.typecode.as_deref(), Some(t.as_str()));
        }
    }
}
