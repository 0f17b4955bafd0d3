//! Subcommand implementations. Results go to stdout as JSON.

use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tfm_parser::{
    compare_documents, discover_documents, retain_real_components, verify_documents,
    BatchConfig, LineScanner, MassListStore, PlainTextSource, SegmentExtractor, TextSource,
};
use tfm_types::{
    ComparisonMatrix, ExtractedEntry, Occurrence, VerificationResult, VerificationStats,
};
use tracing::{info, warn};

use crate::cli::{mass_list_config, Command, ScanArgs, SegmentArgs};

type CommandResult = Result<(), Box<dyn Error>>;

#[derive(Serialize)]
struct ScanOutput {
    document: String,
    error: Option<String>,
    lines: usize,
    context_resets: usize,
    occurrences: Vec<Occurrence>,
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    matrix: &'a ComparisonMatrix,
    failed_documents: &'a [String],
}

#[derive(Serialize)]
struct VerifyOutput<'a> {
    document: &'a str,
    error: Option<&'a str>,
    stats: VerificationStats,
    match_rate: f64,
    result: &'a VerificationResult,
}

/// Runs the parsed subcommand.
pub fn run(command: Command) -> CommandResult {
    match command {
        Command::Scan { paths, scan } => run_scan(&paths, &scan),
        Command::Extract { path, segments } => run_extract(&path, &segments),
        Command::Compare {
            main,
            others,
            segments,
        } => run_compare(&main, &others, &segments),
        Command::Verify {
            mass_list,
            delimiter,
            paths,
            scan,
        } => run_verify(&mass_list, delimiter, &paths, &scan),
    }
}

fn run_scan(paths: &[PathBuf], args: &ScanArgs) -> CommandResult {
    let scanner = LineScanner::new(args.config());
    let default_system = args.default_system.as_deref();
    let mut outputs = Vec::new();

    for path in expand_paths(paths)? {
        outputs.push(scan_one(&PlainTextSource, &scanner, &path, default_system));
    }

    print_json(&outputs)
}

/// Scans one document. A document that cannot be read is reported, not fatal.
fn scan_one<S: TextSource>(
    source: &S,
    scanner: &LineScanner,
    path: &Path,
    default_system: Option<&str>,
) -> ScanOutput {
    let document = path.display().to_string();
    let text = match source.extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(document = %document, "Failed to read document: {}", e);
            return ScanOutput {
                document,
                error: Some(e.to_string()),
                lines: 0,
                context_resets: 0,
                occurrences: Vec::new(),
            };
        }
    };

    let (mut occurrences, stats) = scanner.scan_with_stats(&text, default_system);
    if scanner.config().apply_denylist {
        occurrences = retain_real_components(occurrences);
    }
    ScanOutput {
        document,
        error: None,
        lines: stats.lines,
        context_resets: stats.context_resets,
        occurrences,
    }
}

fn run_extract(path: &Path, args: &SegmentArgs) -> CommandResult {
    let text = PlainTextSource.extract_text(path)?;
    let label = path.display().to_string();
    let entries: Vec<ExtractedEntry> =
        SegmentExtractor::new(args.config()).extract(&text, &label, &args.mask());
    print_json(&entries)
}

fn run_compare(main: &Path, others: &[PathBuf], args: &SegmentArgs) -> CommandResult {
    let report = compare_documents(
        &PlainTextSource,
        main,
        others,
        &args.mask(),
        &BatchConfig {
            extract: args.config(),
            ..Default::default()
        },
    );
    print_json(&CompareOutput {
        matrix: &report.matrix,
        failed_documents: &report.failed_documents,
    })
}

fn run_verify(mass_list: &Path, delimiter: u8, paths: &[PathBuf], args: &ScanArgs) -> CommandResult {
    let mut store = MassListStore::new();
    let count = store.load(mass_list, &mass_list_config(delimiter))?;
    info!("Loaded {} mass-list items from {}", count, mass_list.display());

    let config = BatchConfig {
        scan: args.config(),
        default_system: args.default_system.clone(),
        ..Default::default()
    };
    let reports = verify_documents(&PlainTextSource, &expand_paths(paths)?, &store, &config);

    let outputs: Vec<VerifyOutput<'_>> = reports
        .iter()
        .map(|report| {
            let stats = report.outcome.stats();
            VerifyOutput {
                document: &report.document_id,
                error: report.error.as_deref(),
                stats,
                match_rate: stats.match_rate(),
                result: &report.outcome,
            }
        })
        .collect();
    print_json(&outputs)
}

/// Replaces each directory with the text documents it contains.
fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut expanded = Vec::new();
    for path in paths {
        if path.is_dir() {
            expanded.extend(discover_documents(path)?);
        } else {
            expanded.push(path.clone());
        }
    }
    Ok(expanded)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
