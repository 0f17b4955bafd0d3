//! Errors and configuration for TFM extraction and verification.

use thiserror::Error;

/// Errors that can occur while reading mass lists or documents.
///
/// The text-processing entry points themselves never fail; these errors
/// come only from the I/O around them.
#[derive(Error, Debug)]
pub enum TfmError {
    /// I/O error reading a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error in a mass-list file.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Missing required column in a mass-list file.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// A mass-list row that cannot become an item.
    #[error("Invalid mass-list row {row}: {reason}")]
    InvalidRow {
        /// One-based data row number.
        row: usize,
        /// Why the row was rejected.
        reason: String,
    },

    /// Text could not be extracted from a document.
    #[error("Text extraction failed for {path}: {reason}")]
    Extraction {
        /// The document path.
        path: String,
        /// Why extraction failed.
        reason: String,
    },
}

/// Result type for TFM I/O operations.
pub type TfmResult<T> = Result<T, TfmError>;

/// Configuration for the line-scanning parser.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Number of context-free lines after which the running system is dropped.
    pub context_window: usize,
    /// How many characters before a component to search for a same-line system.
    pub lookback_chars: usize,
    /// Whether batch paths drop denylisted codes (`DN50`, `M10`, ...) from results.
    pub apply_denylist: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            context_window: 2,
            lookback_chars: 20,
            apply_denylist: true,
        }
    }
}

impl ScanConfig {
    /// Keeps denylisted codes so a reviewer can see near misses.
    pub fn raw() -> Self {
        Self {
            apply_denylist: false,
            ..Default::default()
        }
    }

    /// Drops the running system after a single context-free line.
    pub fn strict() -> Self {
        Self {
            context_window: 1,
            ..Default::default()
        }
    }
}

/// Configuration for the configurable segment extractor.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Bare components shorter than this are discarded.
    pub min_component_len: usize,
    /// Whether codes with a denylisted component are dropped.
    pub apply_denylist: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            min_component_len: 4,
            apply_denylist: false,
        }
    }
}

impl ExtractConfig {
    /// Drops denylisted components (`DN50`, `IP54`, ...) from the results.
    pub fn filtered() -> Self {
        Self {
            apply_denylist: true,
            ..Default::default()
        }
    }
}

/// Configuration for reading a mass-list file.
#[derive(Debug, Clone)]
pub struct MassListConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Header of the identifier column.
    pub id_column: String,
    /// Header of the full TFM code column.
    pub tfm_column: String,
    /// Header of the system column.
    pub system_column: String,
    /// Header of the component column.
    pub component_column: String,
    /// Header of the optional description column.
    pub description_column: String,
}

impl Default for MassListConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            id_column: "id".to_string(),
            tfm_column: "tfm".to_string(),
            system_column: "system".to_string(),
            component_column: "component".to_string(),
            description_column: "description".to_string(),
        }
    }
}

impl MassListConfig {
    /// Comma-separated mass list with default headers.
    pub fn csv() -> Self {
        Self {
            delimiter: b',',
            ..Default::default()
        }
    }

    /// Tab-separated mass list with default headers.
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }
}

/// Configuration for multi-document batches.
///
/// Both scanning and extraction filter denylisted codes by default.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Scanner settings used for verification.
    pub scan: ScanConfig,
    /// Extractor settings used for comparison.
    pub extract: ExtractConfig,
    /// Default system for every document. When unset, one is derived from each file name.
    pub default_system: Option<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            extract: ExtractConfig::filtered(),
            default_system: None,
        }
    }
}

/// Statistics from scanning one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Lines read.
    pub lines: usize,
    /// Lines that were empty after trimming.
    pub blank_lines: usize,
    /// Occurrences emitted.
    pub occurrences: usize,
    /// Occurrences emitted by the inline pass.
    pub inline_occurrences: usize,
    /// Times the running context was dropped.
    pub context_resets: usize,
}

impl ScanStats {
    /// Returns the percentage of occurrences that were written as full inline codes.
    pub fn inline_rate(&self) -> f64 {
        if self.occurrences == 0 {
            0.0
        } else {
            (self.inline_occurrences as f64 / self.occurrences as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_config_default() {
        let config = ScanConfig::default();
        assert_eq!(config.context_window, 2);
        assert_eq!(config.lookback_chars, 20);
        assert!(config.apply_denylist);
        assert!(!ScanConfig::raw().apply_denylist);
        assert_eq!(ScanConfig::strict().context_window, 1);
    }

    #[test]
    fn test_batch_config_filters_by_default() {
        let config = BatchConfig::default();
        assert!(config.scan.apply_denylist);
        assert!(config.extract.apply_denylist);
        assert!(!ExtractConfig::default().apply_denylist);
    }

    #[test]
    fn test_mass_list_config_presets() {
        assert_eq!(MassListConfig::default().delimiter, b';');
        assert_eq!(MassListConfig::csv().delimiter, b',');
        assert_eq!(MassListConfig::tsv().delimiter, b'\t');
        assert_eq!(MassListConfig::tsv().tfm_column, "tfm");
    }

    #[test]
    fn test_scan_stats_inline_rate() {
        let stats = ScanStats {
            occurrences: 4,
            inline_occurrences: 1,
            ..Default::default()
        };
        assert!((stats.inline_rate() - 25.0).abs() < 0.01);
        assert_eq!(ScanStats::default().inline_rate(), 0.0);
    }
}
