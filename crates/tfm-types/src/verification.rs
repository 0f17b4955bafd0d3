//! Mass-list verification results.

use std::collections::HashSet;

use crate::{MassListItem, Occurrence};

/// Which matching rule paired an occurrence with a mass-list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchRule {
    /// Normalized code and normalized TFM contain one another.
    TfmSubstring,
    /// Normalized code equals the normalized component.
    Component,
    /// Only the system codes agree. Advisory.
    SystemOnly,
}

impl MatchRule {
    /// Returns true for matches that should not be relied on for sign-off.
    pub fn is_advisory(self) -> bool {
        matches!(self, Self::SystemOnly)
    }
}

/// An occurrence paired with the mass-list item it matched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerificationMatch {
    /// The scanned occurrence.
    pub occurrence: Occurrence,
    /// The matched mass-list item.
    pub item: MassListItem,
    /// The rule that produced the match.
    pub rule: MatchRule,
}

/// Outcome of verifying one document against a mass list.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerificationResult {
    /// Matched occurrence/item pairs.
    pub matches: Vec<VerificationMatch>,
    /// Mass-list items matched by no occurrence.
    pub missing_in_drawing: Vec<MassListItem>,
    /// Occurrences matching no mass-list item.
    pub unmatched_components: Vec<Occurrence>,
}

impl VerificationResult {
    /// Returns summary counts.
    pub fn stats(&self) -> VerificationStats {
        let matched_items: HashSet<&str> = self.matches.iter().map(|m| m.item.id.as_str()).collect();
        VerificationStats {
            matched_occurrences: self.matches.len(),
            matched_items: matched_items.len(),
            missing_items: self.missing_in_drawing.len(),
            unmatched_occurrences: self.unmatched_components.len(),
            advisory_matches: self.matches.iter().filter(|m| m.rule.is_advisory()).count(),
        }
    }
}

/// Summary counts for a verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerificationStats {
    /// Occurrences that matched an item.
    pub matched_occurrences: usize,
    /// Distinct items matched by at least one occurrence.
    pub matched_items: usize,
    /// Items not found in the document.
    pub missing_items: usize,
    /// Occurrences not found in the mass list.
    pub unmatched_occurrences: usize,
    /// Matches produced by the system-only rule.
    pub advisory_matches: usize,
}

impl VerificationStats {
    /// Returns the percentage of mass-list items found in the document.
    pub fn match_rate(&self) -> f64 {
        let total = self.matched_items + self.missing_items;
        if total == 0 {
            0.0
        } else {
            (self.matched_items as f64 / total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchKind;

    #[test]
    fn test_stats_match_rate() {
        let item = MassListItem::new("1", "=360.001-RTA001", "360.001", "RTA001");
        let result = VerificationResult {
            matches: vec![VerificationMatch {
                occurrence: Occurrence::new("RTA001", MatchKind::Inline),
                item: item.clone(),
                rule: MatchRule::TfmSubstring,
            }],
            missing_in_drawing: vec![
                MassListItem::new("2", "=360.001-RTA002", "360.001", "RTA002"),
                MassListItem::new("3", "=360.001-RTA003", "360.001", "RTA003"),
                MassListItem::new("4", "=360.001-RTA004", "360.001", "RTA004"),
            ],
            unmatched_components: vec![],
        };

        let stats = result.stats();
        assert_eq!(stats.matched_items, 1);
        assert_eq!(stats.missing_items, 3);
        assert!((stats.match_rate() - 25.0).abs() < 0.01);
        assert_eq!(stats.advisory_matches, 0);
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(VerificationResult::default().stats().match_rate(), 0.0);
    }
}
