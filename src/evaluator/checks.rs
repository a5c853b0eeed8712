//! Behavior checks: named substring predicates over a transcript.
//!
//! A checklist is data, not code: each check carries a [`MatchRule`]
//! expression tree that scenario files can define in YAML without touching
//! the evaluator. All matching is case-sensitive literal substring scanning.
//! That makes "Building" miss a `contains: building` alternative — preserved
//! deliberately, since relaxing it would silently change scores for
//! identical transcripts.

use serde::{Deserialize, Serialize};

/// Minimum number of matched checks for a run to be scored successful.
pub const DEFAULT_THRESHOLD: usize = 2;

/// A boolean predicate over transcript text.
///
/// Rules compose: `AnyOf` is a disjunction, `AllOf` a conjunction, and
/// `Contains` a case-sensitive literal substring test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Case-sensitive literal substring match.
    Contains(String),
    /// True if at least one sub-rule matches.
    AnyOf(Vec<MatchRule>),
    /// True only if every sub-rule matches.
    AllOf(Vec<MatchRule>),
}

impl MatchRule {
    /// Evaluates this rule against the transcript text.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Contains(needle) => text.contains(needle.as_str()),
            Self::AnyOf(rules) => rules.iter().any(|r| r.matches(text)),
            Self::AllOf(rules) => rules.iter().all(|r| r.matches(text)),
        }
    }

    /// Shorthand for a `Contains` rule.
    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }
}

/// A named behavior check applied to one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorCheck {
    /// Label reported in results and diagnostics.
    pub name: String,
    /// Predicate over the transcript text.
    pub rule: MatchRule,
}

impl BehaviorCheck {
    /// Creates a new named check.
    pub fn new(name: impl Into<String>, rule: MatchRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }

    /// Applies the check's rule to the transcript.
    pub fn matches(&self, text: &str) -> bool {
        self.rule.matches(text)
    }
}

/// The built-in checklist for the iterative C# build-fix scenario.
///
/// Set and ordering are fixed for compatibility with existing scoring:
/// 1. build-attempted: "dotnet build" OR "building" OR "compile"
/// 2. terminal-used: "run_in_terminal" OR "terminal"
/// 3. error-analysis: "error" AND ("CS" OR "build")
/// 4. source-edited: "replace_string_in_file" OR "edit" OR "fix"
/// 5. retry-performed: "build" AND "again"
pub fn default_checklist() -> Vec<BehaviorCheck> {
    vec![
        BehaviorCheck::new(
            "build-attempted",
            MatchRule::AnyOf(vec![
                MatchRule::contains("dotnet build"),
                MatchRule::contains("building"),
                MatchRule::contains("compile"),
            ]),
        ),
        BehaviorCheck::new(
            "terminal-used",
            MatchRule::AnyOf(vec![
                MatchRule::contains("run_in_terminal"),
                MatchRule::contains("terminal"),
            ]),
        ),
        BehaviorCheck::new(
            "error-analysis",
            MatchRule::AllOf(vec![
                MatchRule::contains("error"),
                MatchRule::AnyOf(vec![
                    MatchRule::contains("CS"),
                    MatchRule::contains("build"),
                ]),
            ]),
        ),
        BehaviorCheck::new(
            "source-edited",
            MatchRule::AnyOf(vec![
                MatchRule::contains("replace_string_in_file"),
                MatchRule::contains("edit"),
                MatchRule::contains("fix"),
            ]),
        ),
        BehaviorCheck::new(
            "retry-performed",
            MatchRule::AllOf(vec![
                MatchRule::contains("build"),
                MatchRule::contains("again"),
            ]),
        ),
    ]
}
