//! Multi-document batches.
//!
//! Documents are read and processed independently (in parallel with the
//! `parallel` feature), then merged sequentially. A document that cannot be
//! read is reported as failed with an empty outcome; the batch never aborts.

use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tfm_types::{ComparisonMatrix, ExtractionResult, SegmentMask, VerificationResult};
use tracing::{info, warn};

use crate::comparison::build_comparison_matrix;
use crate::denylist::retain_real_components;
use crate::extractor::SegmentExtractor;
use crate::loader::{default_system_from_filename, document_id, TextSource};
use crate::scanner::LineScanner;
use crate::store::MassListStore;
use crate::types::BatchConfig;
use crate::verifier::verify_against_store;

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport<T> {
    /// File name of the document.
    pub document_id: String,
    /// Result for the document; empty when it failed.
    pub outcome: T,
    /// Why the document failed, if it did.
    pub error: Option<String>,
}

impl<T> DocumentReport<T> {
    /// Returns true if the document could not be processed.
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Comparison matrix plus the documents that could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonReport {
    /// The merged matrix. Failed documents appear as columns with no codes.
    pub matrix: ComparisonMatrix,
    /// File names of documents that failed.
    pub failed_documents: Vec<String>,
}

/// Scans each document and verifies it against the mass list.
///
/// Each document uses `config.default_system`, or the system in its file name
/// when none is configured.
pub fn verify_documents<S: TextSource + Sync>(
    source: &S,
    paths: &[PathBuf],
    store: &MassListStore,
    config: &BatchConfig,
) -> Vec<DocumentReport<VerificationResult>> {
    let scanner = LineScanner::new(config.scan.clone());

    let reports = map_documents(source, paths, |id, text| {
        let default_system = config
            .default_system
            .clone()
            .or_else(|| default_system_from_filename(id));
        let mut occurrences = scanner.scan(&text, default_system.as_deref());
        if scanner.config().apply_denylist {
            occurrences = retain_real_components(occurrences);
        }
        verify_against_store(&occurrences, store)
    });

    let failed = reports.iter().filter(|r| r.failed()).count();
    let matches: usize = reports.iter().map(|r| r.outcome.matches.len()).sum();
    info!(
        documents = reports.len(),
        failed,
        matches,
        items = store.len(),
        "Verified documents against mass list"
    );
    reports
}

/// Extracts codes from a main document and its comparison documents and
/// builds the comparison matrix.
pub fn compare_documents<S: TextSource + Sync>(
    source: &S,
    main: &Path,
    others: &[PathBuf],
    mask: &SegmentMask,
    config: &BatchConfig,
) -> ComparisonReport {
    let extractor = SegmentExtractor::new(config.extract.clone());

    let mut paths = Vec::with_capacity(others.len() + 1);
    paths.push(main.to_path_buf());
    paths.extend_from_slice(others);

    let mut reports = map_documents(source, &paths, |id, text| {
        ExtractionResult::from_entries(id, extractor.extract(&text, id, mask))
    })
    .into_iter();

    let mut failed_documents = Vec::new();
    // A failed document keeps its own column, with no codes.
    let mut unpack = |report: DocumentReport<ExtractionResult>| {
        if report.failed() {
            let result = ExtractionResult::empty(report.document_id.clone());
            failed_documents.push(report.document_id);
            result
        } else {
            report.outcome
        }
    };

    let main_result = reports
        .next()
        .map(&mut unpack)
        .unwrap_or_else(|| ExtractionResult::empty(document_id(main)));
    let other_results: Vec<ExtractionResult> = reports.map(&mut unpack).collect();

    let matrix = build_comparison_matrix(&main_result, &other_results);
    info!(
        documents = matrix.documents.len(),
        failed = failed_documents.len(),
        codes = matrix.len(),
        "Built comparison matrix"
    );

    ComparisonReport {
        matrix,
        failed_documents,
    }
}

/// Reads each document and applies `process` to its text, keeping input order.
fn map_documents<S, T, F>(source: &S, paths: &[PathBuf], process: F) -> Vec<DocumentReport<T>>
where
    S: TextSource + Sync,
    T: Default + Send,
    F: Fn(&str, String) -> T + Sync + Send,
{
    let run = |path: &PathBuf| {
        let id = document_id(path);
        match source.extract_text(path) {
            Ok(text) => DocumentReport {
                outcome: process(&id, text),
                document_id: id,
                error: None,
            },
            Err(e) => {
                warn!(document = %id, "Failed to read document: {}", e);
                DocumentReport {
                    document_id: id,
                    outcome: T::default(),
                    error: Some(e.to_string()),
                }
            }
        }
    };

    #[cfg(feature = "parallel")]
    let reports = paths.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let reports = paths.iter().map(run).collect();

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tfm_types::MassListItem;

    use crate::types::{TfmError, TfmResult};

    /// In-memory documents keyed by file name.
    struct MockSource(HashMap<String, String>);

    impl MockSource {
        fn new(documents: &[(&str, &str)]) -> Self {
            Self(
                documents
                    .iter()
                    .map(|(name, text)| (name.to_string(), text.to_string()))
                    .collect(),
            )
        }
    }

    impl TextSource for MockSource {
        fn extract_text(&self, path: &Path) -> TfmResult<String> {
            self.0
                .get(&document_id(path))
                .cloned()
                .ok_or_else(|| TfmError::FileNotFound {
                    path: path.display().to_string(),
                })
        }
    }

    fn make_paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("drawings").join(n)).collect()
    }

    fn make_store() -> MassListStore {
        MassListStore::from_items([
            MassListItem::new("1", "+1=360.001-RTA001", "360.001", "RTA001"),
            MassListItem::new("2", "+1=360.001-KA002", "360.001", "KA002"),
            MassListItem::new("3", "+1=433.001-JP003", "433.001", "JP003"),
        ])
    }

    #[test]
    fn test_verify_documents_keeps_order_and_reports_failures() {
        let source = MockSource::new(&[
            ("a.txt", "+1=360.001-RTA001\n"),
            ("c.txt", "KA002 DN50\n"),
        ]);
        let paths = make_paths(&["a.txt", "b.txt", "c.txt"]);

        let reports = verify_documents(&source, &paths, &make_store(), &BatchConfig::default());

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].document_id, "a.txt");
        assert_eq!(reports[0].outcome.matches[0].item.id, "1");
        assert!(reports[1].failed());
        assert_eq!(reports[1].outcome, VerificationResult::default());
        assert!(!reports[2].failed());
        assert_eq!(reports[2].outcome.matches.len(), 1);
        assert_eq!(reports[2].outcome.matches[0].item.id, "2");
        assert!(reports[2].outcome.unmatched_components.is_empty());
    }

    #[test]
    fn test_verify_documents_raw_keeps_denylisted_codes() {
        let source = MockSource::new(&[("c.txt", "KA002 DN50\n")]);
        let config = BatchConfig {
            scan: crate::types::ScanConfig::raw(),
            ..Default::default()
        };

        let reports = verify_documents(&source, &make_paths(&["c.txt"]), &make_store(), &config);
        let codes: Vec<&str> = reports[0]
            .outcome
            .unmatched_components
            .iter()
            .map(|o| o.code.as_str())
            .collect();
        assert_eq!(codes, vec!["DN50"]);
    }

    #[test]
    fn test_verify_documents_default_system_from_filename() {
        let source = MockSource::new(&[("433.001 plan.txt", "XY999\n")]);
        let reports = verify_documents(
            &source,
            &make_paths(&["433.001 plan.txt"]),
            &make_store(),
            &BatchConfig::default(),
        );

        let result = &reports[0].outcome;
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].item.id, "3");
        assert_eq!(result.matches[0].occurrence.system.as_deref(), Some("433.001"));
    }

    #[test]
    fn test_compare_documents() {
        let source = MockSource::new(&[
            ("main.txt", "RTA001 KA002"),
            ("other.txt", "KA002 JP003"),
        ]);
        let paths = make_paths(&["main.txt", "other.txt", "gone.txt"]);

        let report = compare_documents(
            &source,
            &paths[0],
            &paths[1..],
            &SegmentMask::component_only(),
            &BatchConfig::default(),
        );

        assert_eq!(report.failed_documents, vec!["gone.txt"]);
        assert_eq!(report.matrix.documents, vec!["main.txt", "other.txt", "gone.txt"]);
        let codes: Vec<&str> = report.matrix.entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["JP003", "KA002", "RTA001"]);

        let ka = report.matrix.get("KA002").unwrap();
        assert_eq!(ka.source_documents, vec!["main.txt", "other.txt"]);
        assert!(!ka.found_in("gone.txt"));
    }

    #[test]
    fn test_compare_documents_keeps_each_failed_column() {
        let source = MockSource::new(&[("main.txt", "RTA001")]);
        let paths = make_paths(&["main.txt", "gone.txt", "lost.txt"]);

        let report = compare_documents(
            &source,
            &paths[0],
            &paths[1..],
            &SegmentMask::component_only(),
            &BatchConfig::default(),
        );

        assert_eq!(report.failed_documents, vec!["gone.txt", "lost.txt"]);
        assert_eq!(report.matrix.documents, vec!["main.txt", "gone.txt", "lost.txt"]);
        let entry = report.matrix.get("RTA001").unwrap();
        let keys: Vec<&str> = entry.presence.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["gone.txt", "lost.txt", "main.txt"]);
        assert!(!entry.found_in("gone.txt"));
        assert!(!entry.found_in("lost.txt"));
    }

    #[test]
    fn test_compare_documents_filters_denylisted_codes() {
        let source = MockSource::new(&[
            ("main.txt", "DN50 RTA001 IP54"),
            ("other.txt", "RTA001 PN16"),
        ]);
        let paths = make_paths(&["main.txt", "other.txt"]);

        let report = compare_documents(
            &source,
            &paths[0],
            &paths[1..],
            &SegmentMask::component_only(),
            &BatchConfig::default(),
        );
        let codes: Vec<&str> = report.matrix.entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["RTA001"]);

        let raw = BatchConfig {
            extract: crate::types::ExtractConfig::default(),
            ..Default::default()
        };
        let report = compare_documents(
            &source,
            &paths[0],
            &paths[1..],
            &SegmentMask::component_only(),
            &raw,
        );
        assert_eq!(report.matrix.len(), 4);
    }
}
