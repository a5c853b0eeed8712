//! buildcheck: heuristic transcript scoring for iterative build-fix agent
//! scenarios.
//!
//! Given the full text transcript of one automated coding-agent run, the
//! evaluator determines whether the transcript exhibits a required minimum
//! number of expected behavioral signals and emits a structured pass/fail
//! verdict plus diagnostic detail. The harness that produces transcripts
//! (container lifecycle, credentials, agent execution) is external; this
//! crate starts where the finalized transcript ends.

// Core modules
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use config::EvalConfig;
pub use diagnostics::{DiagnosticRecord, DiagnosticsWriter};
pub use error::{DiagnosticsError, ScenarioError};
pub use evaluator::{
    default_checklist, evaluate, BehaviorCheck, EvaluationResult, MatchRule, DEFAULT_THRESHOLD,
};
pub use report::{EntryResult, RunSummary};
pub use scenario::Scenario;
