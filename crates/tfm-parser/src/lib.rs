//! # tfm-parser
//!
//! Extraction, comparison and verification of TFM codes in document text.
//!
//! - [`scan_document_text`] resolves every component mention in a document to
//!   its probable system, with a match kind and confidence.
//! - [`extract_segments`] pulls distinct codes out of text under a
//!   [`SegmentMask`](tfm_types::SegmentMask).
//! - [`build_comparison_matrix`] broadcasts extracted codes over documents.
//! - [`verify_against_registry`] checks occurrences against a project mass list.
//!
//! The text entry points never fail. I/O around them (mass-list files,
//! document discovery, batches) returns [`TfmResult`].
//!
//! ## Features
//!
//! - `parallel` (default): Processes batch documents concurrently with rayon.
//!
//! ## Usage
//!
//! ```rust
//! use tfm_parser::{retain_real_components, scan_document_text, verify_against_registry};
//! use tfm_types::{MassListItem, MatchKind};
//!
//! let text = "=360.001 Ventilasjon\nRTA001 og DN50\n";
//! let occurrences = retain_real_components(scan_document_text(text, None));
//! assert_eq!(occurrences.len(), 1);
//! assert_eq!(occurrences[0].match_kind, MatchKind::Context);
//!
//! let registry = vec![MassListItem::new("1", "+1=360.001-RTA001", "360.001", "RTA001")];
//! let result = verify_against_registry(&occurrences, &registry);
//! assert!(result.missing_in_drawing.is_empty());
//! ```

#![warn(missing_docs)]

pub mod batch;
pub mod comparison;
pub mod denylist;
pub mod extractor;
pub mod grammar;
pub mod loader;
pub mod normalize;
pub mod reader;
pub mod scanner;
pub mod store;
pub mod types;
pub mod verifier;

// Re-export tfm-types for convenience
pub use tfm_types;

pub use batch::{compare_documents, verify_documents, ComparisonReport, DocumentReport};
pub use comparison::build_comparison_matrix;
pub use denylist::{denylist_reason, is_denylisted, retain_real_components};
pub use extractor::{extract_segments, SegmentExtractor, Strategy};
pub use grammar::parse_single_code;
pub use loader::{default_system_from_filename, discover_documents, PlainTextSource, TextSource};
pub use normalize::{component_prefix, locale_cmp, normalize_code, normalize_registry_key};
pub use reader::MassListReader;
pub use scanner::{scan_document_text, LineScanner, ScanContext};
pub use store::MassListStore;
pub use types::{
    BatchConfig, ExtractConfig, MassListConfig, ScanConfig, ScanStats, TfmError, TfmResult,
};
pub use verifier::{verify_against_registry, verify_against_store};
