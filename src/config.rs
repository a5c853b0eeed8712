//! Configuration for evaluation runs.
//!
//! Resolved once, before any evaluation. The evaluator itself never reads
//! the environment; everything it needs arrives through this value.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default path for the per-run diagnostic record, alongside the scenario.
pub const DEFAULT_DIAGNOSTICS_PATH: &str = "./diagnostics.json";

/// Configuration for scoring transcripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Where the diagnostic record is written.
    pub diagnostics_path: PathBuf,
    /// Overrides the scenario's threshold when set.
    pub threshold_override: Option<usize>,
    /// Keep timestamped diagnostic history instead of overwriting.
    pub keep_history: bool,
}

impl EvalConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self {
            diagnostics_path: PathBuf::from(DEFAULT_DIAGNOSTICS_PATH),
            threshold_override: None,
            keep_history: false,
        }
    }

    /// Sets the diagnostics output path.
    pub fn with_diagnostics_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.diagnostics_path = path.into();
        self
    }

    /// Overrides the scenario threshold.
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold_override = Some(threshold);
        self
    }

    /// Enables diagnostic history mode.
    pub fn with_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    /// The threshold to use for a scenario with the given default.
    pub fn effective_threshold(&self, scenario_threshold: usize) -> usize {
        self.threshold_override.unwrap_or(scenario_threshold)
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::new()
    }
}
