//! Comparison matrix builder.
//!
//! Broadcasts the union of all extracted codes over every participating
//! document. Codes are compared by exact string equality only.

use std::collections::{BTreeMap, HashMap};

use tfm_types::{ComparisonEntry, ComparisonMatrix, ExtractionResult};

use crate::normalize::locale_cmp;

/// Builds the presence matrix for a main document and its comparison documents.
///
/// Every entry's `presence` has a key for every participating document.
/// Entries are sorted by code with [`locale_cmp`]. Repeated document
/// identifiers are merged.
///
/// # Examples
///
/// ```
/// use tfm_parser::build_comparison_matrix;
/// use tfm_types::ExtractionResult;
///
/// let main = ExtractionResult::new("main.txt", vec!["RTA001".to_string(), "KA002".to_string()]);
/// let other = ExtractionResult::new("other.txt", vec!["RTA001".to_string()]);
///
/// let matrix = build_comparison_matrix(&main, &[other]);
/// let ka = matrix.get("KA002").unwrap();
/// assert!(ka.found_in("main.txt"));
/// assert!(!ka.found_in("other.txt"));
/// assert_eq!(ka.presence.len(), 2);
/// ```
pub fn build_comparison_matrix(
    main: &ExtractionResult,
    others: &[ExtractionResult],
) -> ComparisonMatrix {
    let mut documents: Vec<String> = Vec::with_capacity(others.len() + 1);
    let mut sources: HashMap<&str, Vec<String>> = HashMap::new();

    for result in std::iter::once(main).chain(others) {
        if !documents.contains(&result.document_id) {
            documents.push(result.document_id.clone());
        }
        for code in &result.codes {
            let found_in = sources.entry(code.as_str()).or_default();
            if !found_in.contains(&result.document_id) {
                found_in.push(result.document_id.clone());
            }
        }
    }

    let mut entries: Vec<ComparisonEntry> = sources
        .into_iter()
        .map(|(code, source_documents)| {
            let presence: BTreeMap<String, bool> = documents
                .iter()
                .map(|doc| (doc.clone(), source_documents.contains(doc)))
                .collect();
            ComparisonEntry {
                code: code.to_string(),
                source_documents,
                presence,
            }
        })
        .collect();

    entries.sort_by(|a, b| locale_cmp(&a.code, &b.code));

    ComparisonMatrix { documents, entries }
}
