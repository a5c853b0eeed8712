//! Error types for buildcheck operations.
//!
//! Defines error types for the two fallible subsystems:
//! - Scenario loading and validation
//! - Diagnostic record persistence
//!
//! The evaluator core itself is total and has no error type: absence of an
//! expected substring is "no match", never a failure.

use thiserror::Error;

/// Errors that can occur while loading or validating a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Scenario file '{0}' not found")]
    NotFound(String),

    #[error("Failed to parse scenario file '{path}': {message}")]
    ParseError { path: String, message: String },

    #[error("Scenario id must be non-empty")]
    EmptyId,

    #[error("Scenario '{0}' has an empty checklist")]
    EmptyChecklist(String),

    #[error("Invalid threshold {threshold} for scenario '{id}': must be in [1, {checks}]")]
    InvalidThreshold {
        id: String,
        threshold: usize,
        checks: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors that can occur while persisting a diagnostic record.
///
/// These are caught and logged by [`crate::diagnostics::DiagnosticsWriter::write_best_effort`];
/// they never change an evaluation verdict.
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("Failed to create diagnostics directory: {0}")]
    DirectoryCreationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
