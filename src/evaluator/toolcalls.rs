//! Tool-call extraction from transcript text.
//!
//! Purely diagnostic: the extracted tokens are persisted alongside the
//! verdict for offline inspection and never influence pass/fail scoring.

use std::sync::OnceLock;

use regex::Regex;

/// Matches a tool-call-shaped token: word characters (including underscores)
/// immediately followed by an opening parenthesis.
const TOOL_CALL_PATTERN: &str = r"\w+\(";

static TOOL_CALL_RE: OnceLock<Regex> = OnceLock::new();

fn tool_call_re() -> &'static Regex {
    TOOL_CALL_RE
        .get_or_init(|| Regex::new(TOOL_CALL_PATTERN).expect("Invalid tool-call pattern"))
}

/// Extracts tool-call-shaped tokens from a transcript, in order of
/// appearance. Duplicates are kept and captures include the trailing `(`.
pub fn extract_tool_calls(transcript: &str) -> Vec<String> {
    tool_call_re()
        .find_iter(transcript)
        .map(|m| m.as_str().to_string())
        .collect()
}
