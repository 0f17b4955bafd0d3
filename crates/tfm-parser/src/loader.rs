//! Document discovery and text sources.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::grammar::system_mention_regex;
use crate::types::{TfmError, TfmResult};

/// File extension of documents handled by [`PlainTextSource`].
pub const TEXT_EXTENSION: &str = "txt";

/// Produces the plain text of a document.
///
/// PDF, Word and spreadsheet conversion live outside this crate; implement
/// this trait to plug one in.
pub trait TextSource {
    /// Returns the full text of the document at `path`.
    fn extract_text(&self, path: &Path) -> TfmResult<String>;
}

/// Reads UTF-8 text files as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract_text(&self, path: &Path) -> TfmResult<String> {
        if !path.exists() {
            return Err(TfmError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| TfmError::Extraction {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(text)
    }
}

/// Lists the text documents directly inside `dir`, sorted by file name.
pub fn discover_documents<P: AsRef<Path>>(dir: P) -> TfmResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(TfmError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_text = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXT_EXTENSION));
        if path.is_file() && is_text {
            documents.push(path);
        }
    }
    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(dir = %dir.display(), count = documents.len(), "Discovered documents");
    Ok(documents)
}

/// Returns the first system code appearing in a document's file name.
///
/// Drawings are commonly named after the system they show, so this is used
/// as the default system when none is configured.
///
/// ```
/// use tfm_parser::default_system_from_filename;
///
/// assert_eq!(default_system_from_filename("360.001_plan_1.txt").as_deref(), Some("360.001"));
/// assert_eq!(default_system_from_filename("notes.txt"), None);
/// ```
pub fn default_system_from_filename(name: &str) -> Option<String> {
    system_mention_regex()
        .captures(name)
        .and_then(|caps| caps.name("system"))
        .map(|m| m.as_str().to_string())
}

/// Returns the identifier used for `path` in reports: its file name.
pub(crate) fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_documents_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "KA002").unwrap();
        fs::write(dir.path().join("a.TXT"), "RTA001").unwrap();
        fs::write(dir.path().join("c.pdf"), "binary").unwrap();
        fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let documents = discover_documents(dir.path()).unwrap();
        let names: Vec<String> = documents.iter().map(|p| document_id(p)).collect();
        assert_eq!(names, vec!["a.TXT", "b.txt"]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let result = discover_documents("/nonexistent/drawings");
        assert!(matches!(result, Err(TfmError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_plain_text_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.txt");
        fs::write(&path, "=360.001\nRTA001\n").unwrap();

        assert_eq!(PlainTextSource.extract_text(&path).unwrap(), "=360.001\nRTA001\n");
        assert!(matches!(
            PlainTextSource.extract_text(&dir.path().join("missing.txt")),
            Err(TfmError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_plain_text_source_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(
            PlainTextSource.extract_text(&path),
            Err(TfmError::Extraction { .. })
        ));
    }

    #[test]
    fn test_default_system_from_filename() {
        assert_eq!(
            default_system_from_filename("Plan 433.001:01 rev B.txt").as_deref(),
            Some("433.001:01")
        );
        assert_eq!(default_system_from_filename("RIV-360.001.txt").as_deref(), Some("360.001"));
        assert_eq!(default_system_from_filename("2024-01-15.txt"), None);
    }
}
