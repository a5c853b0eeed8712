//! Aggregation of evaluation results across a batch of transcripts.
//!
//! The evaluator scores one transcript at a time; this module rolls the
//! per-entry verdicts up into a single pass/fail report for the run.

use serde::{Deserialize, Serialize};

use crate::evaluator::EvaluationResult;

/// One scored transcript within a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryResult {
    /// Identifier for the transcript, typically its file name.
    pub name: String,
    /// The verdict for this entry.
    pub result: EvaluationResult,
}

/// Summary of a batch of evaluations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Scenario the batch was scored against.
    pub scenario_id: String,
    /// Total number of entries evaluated.
    pub total: usize,
    /// Number of successful verdicts.
    pub passed: usize,
    /// Number of failing verdicts.
    pub failed: usize,
    /// All per-entry results, in evaluation order.
    pub entries: Vec<EntryResult>,
}

impl RunSummary {
    /// Builds a summary from per-entry results.
    pub fn from_entries(scenario_id: impl Into<String>, entries: Vec<EntryResult>) -> Self {
        let passed = entries.iter().filter(|e| e.result.success).count();
        let failed = entries.len() - passed;
        Self {
            scenario_id: scenario_id.into(),
            total: entries.len(),
            passed,
            failed,
            entries,
        }
    }

    /// True when every entry passed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Pass rate as a percentage. Empty batches count as 100%.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Only the failing entries.
    pub fn failures(&self) -> Vec<&EntryResult> {
        self.entries.iter().filter(|e| !e.result.success).collect()
    }
}
