//! Transcript evaluator.
//!
//! Classifies a free-text agent transcript as demonstrating a minimum viable
//! subset of an expected behavioral checklist, and explains the
//! classification.
//!
//! # Architecture
//!
//! ```text
//! Transcript (string) → evaluate(checks, threshold) → EvaluationResult
//!                     → extract_tool_calls           → diagnostics only
//! ```
//!
//! The evaluator never observes partial or streaming output: the harness
//! that runs the agent finalizes the transcript before calling in.
//!
//! # Example
//!
//! ```
//! use buildcheck::evaluator::{default_checklist, evaluate, DEFAULT_THRESHOLD};
//!
//! let transcript = "Running dotnet build now. error CS1002 found.";
//! let result = evaluate(transcript, &default_checklist(), DEFAULT_THRESHOLD);
//! assert!(result.success);
//! assert_eq!(result.matched_count, 2);
//! ```

pub mod checks;
pub mod engine;
pub mod toolcalls;

pub use checks::{default_checklist, BehaviorCheck, MatchRule, DEFAULT_THRESHOLD};
pub use engine::{evaluate, EvaluationResult};
pub use toolcalls::extract_tool_calls;
