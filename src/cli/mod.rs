//! Command-line interface for buildcheck.
//!
//! Provides commands for scoring single transcripts, batch evaluation, and
//! inspecting the active checklist.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli};
