//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tfm_parser::{ExtractConfig, MassListConfig, ScanConfig};
use tfm_types::{Segment, SegmentMask};

/// Find, compare and verify TFM codes in plain-text documents.
#[derive(Parser, Debug)]
#[command(name = "tfm-check", version)]
#[command(about = "Find, compare and verify TFM codes in plain-text documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan documents and print every component occurrence
    Scan {
        /// Documents, or directories of .txt documents
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Extract distinct codes from one document
    Extract {
        /// Document to extract from
        path: PathBuf,

        #[command(flatten)]
        segments: SegmentArgs,
    },

    /// Compare the codes of a main document against other documents
    Compare {
        /// Main document
        main: PathBuf,

        /// Documents to compare against
        #[arg(required = true)]
        others: Vec<PathBuf>,

        #[command(flatten)]
        segments: SegmentArgs,
    },

    /// Verify documents against a project mass list
    Verify {
        /// Mass-list file (delimited, with a header row)
        #[arg(long, short = 'm')]
        mass_list: PathBuf,

        /// Mass-list field delimiter (a single character, or "tab")
        #[arg(long, short = 'd', default_value = ";", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Documents, or directories of .txt documents
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        scan: ScanArgs,
    },
}

/// Options for the line scanner.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// System assumed for components with no system context
    #[arg(long, short = 's', env = "TFM_DEFAULT_SYSTEM")]
    pub default_system: Option<String>,

    /// Keep denylisted shorthand such as DN50 or M10
    #[arg(long)]
    pub raw: bool,

    /// Drop the running system after one line without codes
    #[arg(long)]
    pub strict: bool,
}

impl ScanArgs {
    pub fn config(&self) -> ScanConfig {
        let mut config = if self.strict {
            ScanConfig::strict()
        } else {
            ScanConfig::default()
        };
        if self.raw {
            config.apply_denylist = false;
        }
        config
    }
}

/// Segment selection for extraction and comparison.
#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    /// Comma-separated segments to keep: building, system, component, typecode
    #[arg(long, value_delimiter = ',', value_parser = parse_segment, default_value = "component")]
    pub segments: Vec<Segment>,

    /// Keep denylisted shorthand such as DN50 or M10
    #[arg(long)]
    pub raw: bool,
}

impl SegmentArgs {
    pub fn mask(&self) -> SegmentMask {
        SegmentMask::from_segments(&self.segments)
    }

    pub fn config(&self) -> ExtractConfig {
        if self.raw {
            ExtractConfig::default()
        } else {
            ExtractConfig::filtered()
        }
    }
}

/// Parses a segment name
fn parse_segment(s: &str) -> Result<Segment, String> {
    Segment::from_name(s).ok_or_else(|| format!("Unknown segment: {}", s))
}

/// Parses a mass-list delimiter
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("Delimiter must be one ASCII character: {}", s)),
    }
}

/// Builds the mass-list configuration for `delimiter`.
pub fn mass_list_config(delimiter: u8) -> MassListConfig {
    MassListConfig {
        delimiter,
        ..Default::default()
    }
}
