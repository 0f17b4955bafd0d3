//! Line-scanning parser.
//!
//! Resolves every component mention in a document to its probable
//! system/building context. Each line runs four passes, most specific first:
//!
//! 1. full inline codes (`+B=S-C%T`), which also refresh the running context
//! 2. bare system mentions, which refresh the running context
//! 3. bare component mentions, resolved from a same-line system, the running
//!    context, or the default system, in that order
//! 4. gap bookkeeping: lines without any system or component age the running
//!    context, which is dropped once it is older than the context window
//!
//! The running context lives in a [`ScanContext`] local to one scan call.

use std::collections::HashSet;
use std::ops::Range;

use tfm_types::{MatchKind, Occurrence};
use tracing::debug;

use crate::grammar::{
    component_mention_regex, full_code_regex, segments_from, system_mention_regex,
    typecode_suffix_regex,
};
use crate::types::{ScanConfig, ScanStats};

/// Running system/building context threaded through the line loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    /// Most recently observed system.
    pub system: Option<String>,
    /// Most recently observed building.
    pub building: Option<String>,
    /// Context-free lines since the system was last refreshed.
    pub gap: usize,
}

impl ScanContext {
    fn refresh(&mut self, system: Option<&str>, building: Option<&str>) {
        if let Some(system) = system {
            self.system = Some(system.to_string());
        }
        if let Some(building) = building {
            self.building = Some(building.to_string());
        }
        self.gap = 0;
    }

    fn clear(&mut self) {
        self.system = None;
        self.building = None;
    }
}

/// Scans document text for component occurrences.
///
/// # Example
///
/// ```
/// use tfm_parser::{LineScanner, ScanConfig};
/// use tfm_types::MatchKind;
///
/// let scanner = LineScanner::new(ScanConfig::default());
/// let occurrences = scanner.scan("System 360.001\nVifte RTA001", None);
///
/// assert_eq!(occurrences.len(), 1);
/// assert_eq!(occurrences[0].system.as_deref(), Some("360.001"));
/// assert_eq!(occurrences[0].match_kind, MatchKind::Context);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineScanner {
    config: ScanConfig,
}

impl LineScanner {
    /// Creates a scanner with the given configuration.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Returns the scanner configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans `text` and returns every occurrence in document order.
    pub fn scan(&self, text: &str, default_system: Option<&str>) -> Vec<Occurrence> {
        self.scan_with_stats(text, default_system).0
    }

    /// Scans `text` and also returns scan statistics.
    pub fn scan_with_stats(
        &self,
        text: &str,
        default_system: Option<&str>,
    ) -> (Vec<Occurrence>, ScanStats) {
        let mut occurrences = Vec::new();
        let mut stats = ScanStats::default();

        if text.trim().is_empty() {
            return (occurrences, stats);
        }

        let default_system = default_system.map(str::trim).filter(|s| !s.is_empty());
        let mut context = ScanContext::default();
        let mut inline_codes: HashSet<String> = HashSet::new();

        for line in text.lines() {
            stats.lines += 1;

            if line.trim().is_empty() {
                stats.blank_lines += 1;
                self.age_context(&mut context, &mut stats);
                continue;
            }

            let emitted_before = occurrences.len();
            let mut found_system = false;

            // Pass 1: full inline codes.
            let mut inline_spans: Vec<Range<usize>> = Vec::new();
            for caps in full_code_regex().captures_iter(line) {
                let Some(whole) = caps.get(0) else { continue };
                let segments = segments_from(&caps);
                let Some(code) = segments.component.clone() else { continue };

                if segments.system.is_some() || segments.building.is_some() {
                    context.refresh(segments.system.as_deref(), segments.building.as_deref());
                    found_system = true;
                }

                inline_spans.push(whole.range());
                inline_codes.insert(code.clone());
                stats.inline_occurrences += 1;
                occurrences.push(Occurrence {
                    code,
                    system: segments.system,
                    building: segments.building,
                    typecode: segments.typecode,
                    confidence: MatchKind::Inline.confidence(),
                    match_kind: MatchKind::Inline,
                });
            }

            // Pass 2: bare systems outside inline spans.
            for caps in system_mention_regex().captures_iter(line) {
                let Some(whole) = caps.get(0) else { continue };
                if overlaps(&inline_spans, &whole.range()) {
                    continue;
                }
                let system = caps.name("system").map(|m| m.as_str());
                let building = caps.name("building").map(|m| m.as_str());
                context.refresh(system, building);
                found_system = true;
            }

            // Pass 3: bare components.
            for caps in component_mention_regex().captures_iter(line) {
                let Some(m) = caps.name("component") else { continue };
                let code = m.as_str();
                if inline_codes.contains(code) || overlaps(&inline_spans, &m.range()) {
                    continue;
                }

                let occurrence = self
                    .resolve(line, m.start(), code, &context, default_system)
                    .with_typecode(trailing_typecode(&line[m.end()..]));
                occurrences.push(occurrence);
                context.gap = 0;
            }

            // Pass 4: gap bookkeeping.
            if !found_system && occurrences.len() == emitted_before {
                self.age_context(&mut context, &mut stats);
            }
        }

        stats.occurrences = occurrences.len();
        debug!(
            lines = stats.lines,
            occurrences = stats.occurrences,
            inline = stats.inline_occurrences,
            context_resets = stats.context_resets,
            "Scanned document text"
        );

        (occurrences, stats)
    }

    /// Resolves the system context of a bare component at byte offset `start`.
    fn resolve(
        &self,
        line: &str,
        start: usize,
        code: &str,
        context: &ScanContext,
        default_system: Option<&str>,
    ) -> Occurrence {
        // Systems that end inside the window count, even if they start before it.
        let window_start = start - lookback_window(line, start, self.config.lookback_chars).len();
        let nearest = system_mention_regex()
            .captures_iter(&line[..start])
            .filter(|caps| caps.get(0).is_some_and(|m| m.end() > window_start))
            .last();
        if let Some(caps) = nearest {
            let building = caps
                .name("building")
                .map(|m| m.as_str().to_string())
                .or_else(|| context.building.clone());
            return Occurrence::new(code, MatchKind::SameLine)
                .with_system(caps.name("system").map(|m| m.as_str().to_string()))
                .with_building(building);
        }

        if context.system.is_some() && context.gap <= self.config.context_window {
            return Occurrence::new(code, MatchKind::Context)
                .with_system(context.system.clone())
                .with_building(context.building.clone());
        }

        match default_system {
            Some(system) => Occurrence::new(code, MatchKind::Default)
                .with_system(Some(system.to_string()))
                .with_building(context.building.clone()),
            None => Occurrence::unresolved(code).with_building(context.building.clone()),
        }
    }

    fn age_context(&self, context: &mut ScanContext, stats: &mut ScanStats) {
        context.gap += 1;
        if context.gap > self.config.context_window && context.system.is_some() {
            context.clear();
            stats.context_resets += 1;
        }
    }
}

/// Scans document text with the default configuration.
///
/// Returns an empty list for empty text. Denylisted shorthand is kept; see
/// [`retain_real_components`](crate::retain_real_components).
///
/// # Examples
///
/// ```
/// use tfm_parser::scan_document_text;
/// use tfm_types::MatchKind;
///
/// let occurrences = scan_document_text("+1234=360.001-RTA001", None);
/// assert_eq!(occurrences[0].code, "RTA001");
/// assert_eq!(occurrences[0].match_kind, MatchKind::Inline);
/// assert!(scan_document_text("", Some("360.001")).is_empty());
/// ```
pub fn scan_document_text(text: &str, default_system: Option<&str>) -> Vec<Occurrence> {
    LineScanner::default().scan(text, default_system)
}

fn overlaps(spans: &[Range<usize>], range: &Range<usize>) -> bool {
    spans
        .iter()
        .any(|span| span.start < range.end && range.start < span.end)
}

/// Returns up to `chars` characters of `line` ending at byte offset `end`.
fn lookback_window(line: &str, end: usize, chars: usize) -> &str {
    if chars == 0 {
        return "";
    }
    let head = &line[..end];
    let from = head
        .char_indices()
        .rev()
        .nth(chars - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &head[from..]
}

fn trailing_typecode(rest: &str) -> Option<String> {
    typecode_suffix_regex()
        .captures(rest)
        .and_then(|caps| caps.name("typecode"))
        .map(|m| m.as_str().to_string())
}
