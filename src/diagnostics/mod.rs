//! Diagnostic record persistence.
//!
//! After each evaluation a [`DiagnosticRecord`] snapshot is written as a
//! single JSON document to a well-known path, overwriting any prior file.
//! Persistence is best-effort: a write failure is logged and discarded and
//! never changes the verdict. Callers needing history must either copy the
//! file out between runs or opt in to [`DiagnosticsWriter::with_history`].

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DiagnosticsError;
use crate::evaluator::{extract_tool_calls, EvaluationResult};

/// Maximum length of the bounded transcript preview, in bytes.
const PREVIEW_MAX_LEN: usize = 500;

/// Persisted JSON snapshot of one evaluation's inputs and outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// When the evaluation ran.
    pub timestamp: DateTime<Utc>,
    /// Length of the full transcript, in bytes.
    pub response_length: usize,
    /// Number of checks that matched.
    pub matched_count: usize,
    /// Total number of checks applied.
    pub total_count: usize,
    /// Final verdict.
    pub success: bool,
    /// Tool-call-shaped tokens found in the transcript, in order.
    pub extracted_tool_calls: Vec<String>,
    /// Bounded prefix of the transcript for quick inspection.
    pub response_preview: String,
    /// The complete transcript as evaluated.
    pub full_response: String,
}

impl DiagnosticRecord {
    /// Builds a record from a transcript and its evaluation result.
    pub fn new(transcript: &str, result: &EvaluationResult) -> Self {
        Self {
            timestamp: Utc::now(),
            response_length: transcript.len(),
            matched_count: result.matched_count,
            total_count: result.total_count,
            success: result.success,
            extracted_tool_calls: extract_tool_calls(transcript),
            response_preview: truncate(transcript, PREVIEW_MAX_LEN),
            full_response: transcript.to_string(),
        }
    }
}

/// Truncates at a char boundary at or below `max` bytes.
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}... [truncated]", &s[..end])
    }
}

/// Writes diagnostic records as JSON files.
///
/// Default mode overwrites a single file in place on every run. History mode
/// is an explicit opt-in that writes one timestamp-suffixed file per run
/// instead, leaving prior records untouched.
pub struct DiagnosticsWriter {
    path: PathBuf,
    keep_history: bool,
}

impl DiagnosticsWriter {
    /// Creates a writer targeting the given file path (overwrite mode).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            keep_history: false,
        }
    }

    /// Switches to history mode: each write goes to a timestamp-suffixed
    /// sibling of the configured path instead of overwriting it.
    pub fn with_history(mut self) -> Self {
        self.keep_history = true;
        self
    }

    /// The path the next write will use.
    pub fn target_path(&self, record: &DiagnosticRecord) -> PathBuf {
        if !self.keep_history {
            return self.path.clone();
        }
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("diagnostics");
        let suffix = record.timestamp.format("%Y%m%dT%H%M%S%3f");
        self.path.with_file_name(format!("{stem}-{suffix}.json"))
    }

    /// Writes the record, creating parent directories as needed.
    ///
    /// Returns the path written. In overwrite mode any prior file at the
    /// path is replaced.
    pub fn write(&self, record: &DiagnosticRecord) -> Result<PathBuf, DiagnosticsError> {
        let path = self.target_path(record);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DiagnosticsError::DirectoryCreationFailed(format!(
                        "Failed to create directory {:?}: {}",
                        parent, e
                    ))
                })?;
            }
        }
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Writes the record, logging and discarding any failure.
    ///
    /// Diagnostic persistence must never turn a scored run into an error.
    pub fn write_best_effort(&self, record: &DiagnosticRecord) {
        if let Err(e) = self.write(record) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist diagnostic record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{default_checklist, evaluate, DEFAULT_THRESHOLD};
    use tempfile::TempDir;

    fn record_for(transcript: &str) -> DiagnosticRecord {
        let result = evaluate(transcript, &default_checklist(), DEFAULT_THRESHOLD);
        DiagnosticRecord::new(transcript, &result)
    }

    #[test]
    fn test_record_captures_counts_and_tool_calls() {
        let record = record_for("run_in_terminal(dotnet build) saw error CS0103");
        assert_eq!(record.response_length, 46);
        assert!(record.success);
        assert_eq!(record.extracted_tool_calls, vec!["run_in_terminal(".to_string()]);
        assert_eq!(record.total_count, 5);
    }

    #[test]
    fn test_preview_is_bounded() {
        let long = "x".repeat(2000);
        let record = record_for(&long);
        assert!(record.response_preview.len() < long.len());
        assert!(record.response_preview.ends_with("... [truncated]"));
        assert_eq!(record.full_response.len(), 2000);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let truncated = truncate("héllo wörld, this is a transcript", 5);
        assert!(truncated.ends_with("... [truncated]"));
    }

    #[test]
    fn test_write_overwrites_prior_record() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("diagnostics.json");
        let writer = DiagnosticsWriter::new(&path);

        writer.write(&record_for("first run")).expect("Write should succeed");
        writer.write(&record_for("second run")).expect("Write should succeed");

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: DiagnosticRecord = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.full_response, "second run");

        // Only the single overwritten file exists.
        let count = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_history_mode_keeps_prior_records() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let writer = DiagnosticsWriter::new(tmp.path().join("diagnostics.json")).with_history();

        let mut first = record_for("first run");
        let mut second = record_for("second run");
        // Distinct timestamps so the suffixed filenames differ.
        first.timestamp = "2026-01-01T00:00:00Z".parse().unwrap();
        second.timestamp = "2026-01-01T00:00:01Z".parse().unwrap();

        writer.write(&first).expect("Write should succeed");
        writer.write(&second).expect("Write should succeed");

        let count = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("nested").join("dir").join("diagnostics.json");
        let writer = DiagnosticsWriter::new(&path);

        let written = writer.write(&record_for("run")).expect("Write should succeed");
        assert!(written.exists());
    }

    #[test]
    fn test_best_effort_swallows_failure() {
        // Point at a path whose parent is a file, so the write must fail.
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "file, not a dir").unwrap();
        let writer = DiagnosticsWriter::new(blocker.join("diagnostics.json"));

        // Must not panic or propagate.
        writer.write_best_effort(&record_for("run"));
    }

    #[test]
    fn test_record_json_round_trip() {
        let record = record_for("dotnet build, error CS1002");
        let json = serde_json::to_string(&record).unwrap();
        let loaded: DiagnosticRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.matched_count, record.matched_count);
        assert_eq!(loaded.full_response, record.full_response);
    }
}
