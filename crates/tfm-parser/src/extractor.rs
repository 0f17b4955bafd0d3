//! Configurable segment extractor.
//!
//! Extracts TFM-shaped values under a caller-chosen [`SegmentMask`] for
//! cross-document comparison. There is no cross-line context here: the text
//! is treated as a whole, with document-wide fallbacks.
//!
//! Extraction runs an ordered list of [`Strategy`] values and stops at the
//! first applicable one that yields anything.

use std::collections::HashSet;

use tfm_types::{ExtractedEntry, SegmentMask, SegmentSet};
use tracing::debug;

use crate::denylist::is_denylisted;
use crate::grammar::{component_mention_regex, segments_from, structured_regex, system_mention_regex};
use crate::types::ExtractConfig;

/// One extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Bare component codes, when the component is the only selected segment.
    ComponentOnly,
    /// System-anchored structured codes composed from the selected segments.
    Structured,
    /// Bare system codes, when the component is not required.
    BareSystem,
    /// Every bare component paired with the first system in the document.
    PairedFirstSystem,
}

impl Strategy {
    /// Strategies in the order they are tried.
    pub const ORDER: [Strategy; 4] = [
        Strategy::ComponentOnly,
        Strategy::Structured,
        Strategy::BareSystem,
        Strategy::PairedFirstSystem,
    ];

    /// Returns true if this strategy can run under `mask`.
    pub fn applies(self, mask: &SegmentMask) -> bool {
        match self {
            Self::ComponentOnly => mask.is_component_only(),
            Self::Structured => mask.system,
            Self::BareSystem => mask.system && !mask.require_component,
            Self::PairedFirstSystem => mask.system && mask.component,
        }
    }

    fn run(self, text: &str, mask: &SegmentMask, config: &ExtractConfig) -> Vec<String> {
        match self {
            Self::ComponentOnly => bare_components(text, config),
            Self::Structured => structured_codes(text, mask, config),
            Self::BareSystem => bare_systems(text, mask),
            Self::PairedFirstSystem => paired_with_first_system(text, mask, config),
        }
    }
}

/// Extracts codes from text under a segment mask.
#[derive(Debug, Clone, Default)]
pub struct SegmentExtractor {
    config: ExtractConfig,
}

impl SegmentExtractor {
    /// Creates an extractor with the given configuration.
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Returns the extractor configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extracts distinct codes from `text`, labelled with `file_label`.
    pub fn extract(&self, text: &str, file_label: &str, mask: &SegmentMask) -> Vec<ExtractedEntry> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        for strategy in Strategy::ORDER {
            if !strategy.applies(mask) {
                continue;
            }
            let codes = strategy.run(text, mask, &self.config);
            if !codes.is_empty() {
                debug!(
                    file = file_label,
                    ?strategy,
                    count = codes.len(),
                    "Extracted segment codes"
                );
                return codes
                    .into_iter()
                    .map(|code| ExtractedEntry {
                        code,
                        file_label: file_label.to_string(),
                    })
                    .collect();
            }
        }

        debug!(file = file_label, ?mask, "No segment codes extracted");
        Vec::new()
    }
}

/// Extracts codes with the default configuration.
///
/// # Examples
///
/// ```
/// use tfm_parser::extract_segments;
/// use tfm_types::SegmentMask;
///
/// let entries = extract_segments(
///     "+1=360.001-RTA001%AB\n=360.001-KA002",
///     "plan.txt",
///     &SegmentMask::system_component(),
/// );
/// let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
/// assert_eq!(codes, vec!["=360.001-RTA001", "=360.001-KA002"]);
/// ```
pub fn extract_segments(text: &str, file_label: &str, mask: &SegmentMask) -> Vec<ExtractedEntry> {
    SegmentExtractor::default().extract(text, file_label, mask)
}

/// Insertion-ordered set of composed codes.
#[derive(Default)]
struct DistinctCodes {
    seen: HashSet<String>,
    codes: Vec<String>,
}

impl DistinctCodes {
    fn insert(&mut self, code: String) {
        if !code.is_empty() && self.seen.insert(code.clone()) {
            self.codes.push(code);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.codes
    }
}

fn is_component_candidate(code: &str, config: &ExtractConfig) -> bool {
    code.chars().count() >= config.min_component_len
        && code.chars().any(|c| c.is_ascii_digit())
        && !code.chars().all(|c| c.is_ascii_digit())
        && !(config.apply_denylist && is_denylisted(code))
}

fn component_candidates<'a>(text: &'a str, config: &'a ExtractConfig) -> impl Iterator<Item = &'a str> {
    component_mention_regex()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(move |code| is_component_candidate(code, config))
}

fn bare_components(text: &str, config: &ExtractConfig) -> Vec<String> {
    let mut codes = DistinctCodes::default();
    for code in component_candidates(text, config) {
        codes.insert(code.to_string());
    }
    codes.into_vec()
}

fn structured_codes(text: &str, mask: &SegmentMask, config: &ExtractConfig) -> Vec<String> {
    let mut codes = DistinctCodes::default();
    for caps in structured_regex().captures_iter(text) {
        let segments = segments_from(&caps);
        if segments.system.is_none() {
            continue;
        }
        if config.apply_denylist && segments.component.as_deref().is_some_and(is_denylisted) {
            continue;
        }
        if mask.require_component && segments.component.is_none() {
            continue;
        }
        codes.insert(mask.compose(&segments));
    }
    codes.into_vec()
}

fn bare_systems(text: &str, mask: &SegmentMask) -> Vec<String> {
    let mut codes = DistinctCodes::default();
    for caps in system_mention_regex().captures_iter(text) {
        let segments = segments_from(&caps);
        codes.insert(mask.compose(&segments));
    }
    codes.into_vec()
}

/// Pairs every component with the first system in the text.
///
/// Documents handled this way are assumed to describe a single system.
fn paired_with_first_system(text: &str, mask: &SegmentMask, config: &ExtractConfig) -> Vec<String> {
    let Some(first_system) = system_mention_regex()
        .captures(text)
        .and_then(|caps| caps.name("system"))
        .map(|m| m.as_str().to_string())
    else {
        return Vec::new();
    };

    let mut codes = DistinctCodes::default();
    for component in component_candidates(text, config) {
        let segments = SegmentSet {
            system: Some(first_system.clone()),
            component: Some(component.to_string()),
            ..Default::default()
        };
        codes.insert(mask.compose(&segments));
    }
    codes.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfm_types::Segment;

    fn codes(entries: &[ExtractedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.code.as_str()).collect()
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_segments("", "a.txt", &SegmentMask::full()).is_empty());
        assert!(extract_segments("   ", "a.txt", &SegmentMask::component_only()).is_empty());
    }

    #[test]
    fn test_component_only_filters() {
        let text = "RTA001 KA1 AB12 RTA001 LB1234 ved +1=360.001-JV002";
        let entries = extract_segments(text, "a.txt", &SegmentMask::component_only());
        assert_eq!(codes(&entries), vec!["RTA001", "AB12", "LB1234", "JV002"]);
        assert!(entries.iter().all(|e| e.file_label == "a.txt"));
    }

    #[test]
    fn test_component_only_does_not_fall_through() {
        let entries = extract_segments("Bare 360.001 her", "a.txt", &SegmentMask::component_only());
        assert!(entries.is_empty());
    }

    #[test]
    fn test_component_only_denylist_optional() {
        let text = "DN50 RTA001";
        let raw = extract_segments(text, "a.txt", &SegmentMask::component_only());
        assert_eq!(codes(&raw), vec!["DN50", "RTA001"]);

        let extractor = SegmentExtractor::new(ExtractConfig {
            apply_denylist: true,
            ..Default::default()
        });
        let filtered = extractor.extract(text, "a.txt", &SegmentMask::component_only());
        assert_eq!(codes(&filtered), vec!["RTA001"]);
    }

    #[test]
    fn test_structured_full_mask() {
        let text = "+1=360.001-RTA001%AB og +1=360.001-RTA001%AB igjen, +2=433.001-KA002";
        let entries = extract_segments(text, "a.txt", &SegmentMask::full());
        assert_eq!(codes(&entries), vec!["+1=360.001-RTA001%AB", "+2=433.001-KA002"]);
    }

    #[test]
    fn test_structured_denylist_optional() {
        let text = "=360.001-DN50 og =360.001-RTA001";
        let raw = extract_segments(text, "a.txt", &SegmentMask::system_component());
        assert_eq!(codes(&raw), vec!["=360.001-DN50", "=360.001-RTA001"]);

        let filtered = SegmentExtractor::new(ExtractConfig::filtered()).extract(
            text,
            "a.txt",
            &SegmentMask::system_component(),
        );
        assert_eq!(codes(&filtered), vec!["=360.001-RTA001"]);
    }

    #[test]
    fn test_structured_system_only_mask() {
        let text = "=360.001-RTA001 og =360.001-KA002 samt 433.001";
        let entries = extract_segments(text, "a.txt", &SegmentMask::system_only());
        assert_eq!(codes(&entries), vec!["=360.001", "=433.001"]);
    }

    #[test]
    fn test_required_component_discards_bare_systems() {
        let text = "=360.001-RTA001 og 433.001";
        let entries = extract_segments(text, "a.txt", &SegmentMask::system_component());
        assert_eq!(codes(&entries), vec!["=360.001-RTA001"]);
    }

    #[test]
    fn test_paired_first_system_fallback() {
        let text = "Anlegg 360.001\nVifte RTA001\nSpjeld KA002\nAnlegg 433.001\nPumpe JP003";
        let entries = extract_segments(text, "a.txt", &SegmentMask::system_component());
        assert_eq!(
            codes(&entries),
            vec!["=360.001-RTA001", "=360.001-KA002", "=360.001-JP003"]
        );
    }

    #[test]
    fn test_paired_without_system_is_empty() {
        let entries = extract_segments("Vifte RTA001", "a.txt", &SegmentMask::system_component());
        assert!(entries.is_empty());
    }

    #[test]
    fn test_optional_component_keeps_system_only_codes() {
        let mask = SegmentMask {
            system: true,
            component: true,
            ..Default::default()
        };
        let entries = extract_segments("Anlegg 360.001\nVifte RTA001", "a.txt", &mask);
        assert_eq!(codes(&entries), vec!["=360.001"]);
    }

    #[test]
    fn test_mask_without_system_or_lone_component() {
        let mask = SegmentMask::from_segments(&[Segment::Building, Segment::Typecode]);
        assert!(extract_segments("+1=360.001-RTA001%AB", "a.txt", &mask).is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "+1=360.001-RTA001\nKA002 KA002\n433.001";
        for mask in [
            SegmentMask::component_only(),
            SegmentMask::system_only(),
            SegmentMask::system_component(),
            SegmentMask::full(),
        ] {
            let first = extract_segments(text, "a.txt", &mask);
            let second = extract_segments(text, "a.txt", &mask);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_strategy_applicability() {
        let mask = SegmentMask::system_component();
        assert!(!Strategy::ComponentOnly.applies(&mask));
        assert!(Strategy::Structured.applies(&mask));
        assert!(!Strategy::BareSystem.applies(&mask));
        assert!(Strategy::PairedFirstSystem.applies(&mask));
    }
}
