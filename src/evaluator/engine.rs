//! The transcript evaluation core.
//!
//! [`evaluate`] is a pure function over an already-materialized transcript
//! string: no I/O, no hidden state, no failure modes. Side effects such as
//! logging and diagnostic persistence are layered on top by callers so the
//! predicate logic stays independently testable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::checks::BehaviorCheck;

/// Outcome of scoring one transcript against one checklist.
///
/// Immutable after construction. Invariant: `matched_count <= total_count`,
/// and `success == (matched_count >= threshold)` for the threshold the
/// evaluation was run with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Whether enough checks matched to meet the threshold.
    pub success: bool,
    /// Number of checks whose predicate matched.
    pub matched_count: usize,
    /// Total number of checks applied.
    pub total_count: usize,
    /// Names of matched checks, in checklist order.
    pub matched_names: Vec<String>,
    /// Deterministic explanation, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Scores a transcript against an ordered checklist.
///
/// Each check is applied in order; `matched_count` is the number of checks
/// whose predicate is true, and `success` is `matched_count >= threshold`.
/// An empty or malformed transcript is never an error: absent substrings
/// simply do not match.
///
/// Callers are expected to pass a non-empty checklist and a threshold in
/// `[1, checks.len()]`; the scenario loader enforces that boundary. The
/// function itself stays total for any input.
pub fn evaluate(transcript: &str, checks: &[BehaviorCheck], threshold: usize) -> EvaluationResult {
    let mut matched_names = Vec::new();

    for check in checks {
        let matched = check.matches(transcript);
        debug!(check = %check.name, matched, "Applied behavior check");
        if matched {
            matched_names.push(check.name.clone());
        }
    }

    let matched_count = matched_names.len();
    let total_count = checks.len();
    let success = matched_count >= threshold;

    let error_message = if success {
        None
    } else {
        Some(format!(
            "Only {} of {} expected behaviors matched (threshold {}). Matched: [{}]",
            matched_count,
            total_count,
            threshold,
            matched_names.join(", ")
        ))
    };

    EvaluationResult {
        success,
        matched_count,
        total_count,
        matched_names,
        error_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::checks::{default_checklist, MatchRule, DEFAULT_THRESHOLD};

    #[test]
    fn test_full_iteration_transcript_matches_all_five() {
        let transcript = "I'll run dotnet build in the terminal. I see error CS0103. \
                          Let me edit the file to fix it, then build again.";
        let result = evaluate(transcript, &default_checklist(), DEFAULT_THRESHOLD);
        assert!(result.success);
        assert_eq!(result.matched_count, 5);
        assert_eq!(result.total_count, 5);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_unrelated_transcript_matches_nothing() {
        let result = evaluate("Looking at the file.", &default_checklist(), DEFAULT_THRESHOLD);
        assert!(!result.success);
        assert_eq!(result.matched_count, 0);
        assert!(result.matched_names.is_empty());
        let message = result.error_message.expect("failure must carry a message");
        assert!(message.contains("0 of 5"));
    }

    #[test]
    fn test_two_matches_meet_default_threshold() {
        let transcript = "Running dotnet build now. error CS1002 found.";
        let result = evaluate(transcript, &default_checklist(), DEFAULT_THRESHOLD);
        assert!(result.success);
        assert_eq!(result.matched_count, 2);
        assert_eq!(
            result.matched_names,
            vec!["build-attempted".to_string(), "error-analysis".to_string()]
        );
    }

    #[test]
    fn test_empty_transcript_is_not_an_error() {
        let result = evaluate("", &default_checklist(), DEFAULT_THRESHOLD);
        assert!(!result.success);
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.total_count, 5);
    }

    #[test]
    fn test_matched_names_preserve_checklist_order() {
        // Mentions "edit" before anything build related; order in the result
        // still follows the checklist, not appearance in the transcript.
        let transcript = "edit the file, then dotnet build";
        let result = evaluate(transcript, &default_checklist(), DEFAULT_THRESHOLD);
        assert_eq!(
            result.matched_names,
            vec!["build-attempted".to_string(), "source-edited".to_string()]
        );
    }

    #[test]
    fn test_success_is_monotonic_in_threshold() {
        let transcript = "Running dotnet build now. error CS1002 found.";
        let checks = default_checklist();
        for threshold in 1..=checks.len() {
            let result = evaluate(transcript, &checks, threshold);
            assert_eq!(result.matched_count, 2);
            assert_eq!(result.success, 2 >= threshold);
        }
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let transcript = "dotnet build in terminal, fix, build again";
        let first = evaluate(transcript, &default_checklist(), DEFAULT_THRESHOLD);
        let second = evaluate(transcript, &default_checklist(), DEFAULT_THRESHOLD);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unrelated_checks_do_not_affect_count() {
        let transcript = "dotnet build finished";
        let mut checks = default_checklist();
        let base = evaluate(transcript, &checks, 1);

        checks.push(BehaviorCheck::new(
            "never-matches",
            MatchRule::contains("zz-no-such-token"),
        ));
        let extended = evaluate(transcript, &checks, 1);
        assert_eq!(base.matched_count, extended.matched_count);
        assert_eq!(base.matched_names, extended.matched_names);
    }

    #[test]
    fn test_failure_message_is_deterministic() {
        let a = evaluate("nothing here", &default_checklist(), DEFAULT_THRESHOLD);
        let b = evaluate("nothing here", &default_checklist(), DEFAULT_THRESHOLD);
        assert_eq!(a.error_message, b.error_message);
    }

    #[test]
    fn test_result_serialization_skips_absent_message() {
        let ok = evaluate(
            "dotnet build, error CS1002",
            &default_checklist(),
            DEFAULT_THRESHOLD,
        );
        let json = serde_json::to_string(&ok).unwrap();
        assert!(!json.contains("error_message"));
        assert!(json.contains("\"success\":true"));
    }
}
