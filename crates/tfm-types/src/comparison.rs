//! Extraction results and the cross-document comparison matrix.

use std::collections::{BTreeMap, HashSet};

/// One extracted code from one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractedEntry {
    /// The composed code string.
    pub code: String,
    /// Label of the document the code was found in.
    pub file_label: String,
}

/// The distinct codes extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractionResult {
    /// Document identifier.
    pub document_id: String,
    /// Distinct codes, in first-seen order.
    pub codes: Vec<String>,
}

impl ExtractionResult {
    /// Creates a result, dropping duplicate codes.
    pub fn new(document_id: impl Into<String>, codes: impl IntoIterator<Item = String>) -> Self {
        let mut seen = HashSet::new();
        let codes = codes
            .into_iter()
            .filter(|code| seen.insert(code.clone()))
            .collect();
        Self {
            document_id: document_id.into(),
            codes,
        }
    }

    /// Creates an empty result, used for documents whose text could not be read.
    pub fn empty(document_id: impl Into<String>) -> Self {
        Self::new(document_id, std::iter::empty())
    }

    /// Collects extracted entries into a result for `document_id`.
    pub fn from_entries(document_id: impl Into<String>, entries: Vec<ExtractedEntry>) -> Self {
        Self::new(document_id, entries.into_iter().map(|e| e.code))
    }

    /// Returns true if the document contains `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }
}

/// Presence of one distinct code across all compared documents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonEntry {
    /// The code string.
    pub code: String,
    /// Documents containing the code, in participation order. Never empty.
    pub source_documents: Vec<String>,
    /// Every participating document mapped to whether it contains the code.
    pub presence: BTreeMap<String, bool>,
}

impl ComparisonEntry {
    /// Returns true if `document_id` contains the code.
    pub fn found_in(&self, document_id: &str) -> bool {
        self.presence.get(document_id).copied().unwrap_or(false)
    }

    /// Returns true if every participating document contains the code.
    pub fn found_in_all(&self) -> bool {
        self.presence.values().all(|present| *present)
    }
}

/// Presence table for a set of compared documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonMatrix {
    /// Participating document identifiers, main document first.
    pub documents: Vec<String>,
    /// One entry per distinct code, sorted by code.
    pub entries: Vec<ComparisonEntry>,
}

impl ComparisonMatrix {
    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no document produced any code.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry for `code`.
    pub fn get(&self, code: &str) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// Codes present somewhere in the set but absent from `document_id`.
    pub fn codes_missing_from(&self, document_id: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !e.found_in(document_id))
            .map(|e| e.code.as_str())
            .collect()
    }

    /// Codes found in `document_id` and in no other document.
    pub fn codes_only_in(&self, document_id: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.source_documents.len() == 1 && e.found_in(document_id))
            .map(|e| e.code.as_str())
            .collect()
    }
}
