//! Mass-list verifier.
//!
//! Pairs each scanned occurrence with the first mass-list item (in registry
//! order) that satisfies one of the matching rules, tried in this order:
//!
//! 1. normalized code and normalized TFM contain one another
//! 2. normalized code equals the normalized component
//! 3. system codes are equal (exact, both non-empty)
//!
//! Normalization uppercases and strips `.`, `-` and `_`. Substring and
//! system-only matches are permissive; [`MatchRule::SystemOnly`] results are
//! advisory.

use tfm_types::{
    MassListItem, MatchRule, Occurrence, VerificationMatch, VerificationResult,
};
use tracing::debug;

use crate::normalize::normalize_registry_key;
use crate::store::{MassListStore, RegistryEntry};

/// Verifies occurrences against a mass-list snapshot.
///
/// Every occurrence ends up in exactly one of `matches` or
/// `unmatched_components`; every item that no occurrence matched ends up in
/// `missing_in_drawing`.
///
/// # Examples
///
/// ```
/// use tfm_parser::{scan_document_text, verify_against_registry};
/// use tfm_types::MassListItem;
///
/// let occurrences = scan_document_text("+1=360.001-RTA001", None);
/// let registry = vec![
///     MassListItem::new("1", "+1=360.001-RTA001", "433.001", "RTA001"),
///     MassListItem::new("2", "+1=433.001-KA002", "433.001", "KA002"),
/// ];
///
/// let result = verify_against_registry(&occurrences, &registry);
/// assert_eq!(result.matches.len(), 1);
/// assert_eq!(result.matches[0].item.id, "1");
/// assert_eq!(result.missing_in_drawing[0].id, "2");
/// ```
pub fn verify_against_registry(
    occurrences: &[Occurrence],
    registry: &[MassListItem],
) -> VerificationResult {
    let entries: Vec<RegistryEntry> = registry.iter().cloned().map(RegistryEntry::new).collect();
    verify_entries(occurrences, &entries)
}

/// Verifies occurrences against a loaded [`MassListStore`].
pub fn verify_against_store(occurrences: &[Occurrence], store: &MassListStore) -> VerificationResult {
    verify_entries(occurrences, store.entries())
}

fn verify_entries(occurrences: &[Occurrence], entries: &[RegistryEntry]) -> VerificationResult {
    let mut result = VerificationResult::default();
    let mut item_matched = vec![false; entries.len()];

    for occurrence in occurrences {
        let code_key = normalize_registry_key(&occurrence.code);
        let found = entries
            .iter()
            .enumerate()
            .find_map(|(i, entry)| match_rule(&code_key, occurrence, entry).map(|rule| (i, rule)));

        match found {
            Some((index, rule)) => {
                item_matched[index] = true;
                result.matches.push(VerificationMatch {
                    occurrence: occurrence.clone(),
                    item: entries[index].item.clone(),
                    rule,
                });
            }
            None => result.unmatched_components.push(occurrence.clone()),
        }
    }

    result.missing_in_drawing = entries
        .iter()
        .zip(&item_matched)
        .filter(|(_, matched)| !**matched)
        .map(|(entry, _)| entry.item.clone())
        .collect();

    debug!(
        occurrences = occurrences.len(),
        items = entries.len(),
        matches = result.matches.len(),
        missing = result.missing_in_drawing.len(),
        unmatched = result.unmatched_components.len(),
        "Verified occurrences against mass list"
    );

    result
}

/// Returns the first rule under which `occurrence` matches `entry`.
fn match_rule(code_key: &str, occurrence: &Occurrence, entry: &RegistryEntry) -> Option<MatchRule> {
    if !code_key.is_empty()
        && !entry.tfm_key.is_empty()
        && (entry.tfm_key.contains(code_key) || code_key.contains(entry.tfm_key.as_str()))
    {
        return Some(MatchRule::TfmSubstring);
    }

    if !code_key.is_empty() && code_key == entry.component_key {
        return Some(MatchRule::Component);
    }

    match occurrence.system.as_deref() {
        Some(system) if !system.is_empty() && !entry.item.system.is_empty() && system == entry.item.system => {
            Some(MatchRule::SystemOnly)
        }
        _ => None,
    }
}
