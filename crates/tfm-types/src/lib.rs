//! # tfm-types
//!
//! Type definitions for TFM facility-identification codes.
//!
//! TFM is a Norwegian building-systems tagging convention of the form
//! `+{building}={system}-{component}%{typecode}`. This crate holds the plain
//! data types shared by the parser, the comparison matrix and the mass-list
//! verifier.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use tfm_types::{MatchKind, Occurrence, SegmentMask, SegmentSet};
//!
//! let occ = Occurrence::new("RTA001", MatchKind::Inline)
//!     .with_system(Some("360.001".to_string()));
//! assert_eq!(occ.confidence, 0.95);
//!
//! let mask = SegmentMask::component_only();
//! assert!(mask.is_component_only());
//! ```

#![warn(missing_docs)]

mod comparison;
mod mask;
mod mass_list;
mod occurrence;
mod segment;
mod verification;

// Re-export all public types at crate root
pub use comparison::{ComparisonEntry, ComparisonMatrix, ExtractedEntry, ExtractionResult};
pub use mask::SegmentMask;
pub use mass_list::MassListItem;
pub use occurrence::{MatchKind, Occurrence};
pub use segment::{Segment, SegmentSet};
pub use verification::{MatchRule, VerificationMatch, VerificationResult, VerificationStats};
