//! CLI command definitions for buildcheck.
//!
//! The binary scores agent transcripts produced by an external simulation
//! harness. The harness (container lifecycle, credentials, agent execution)
//! is a separate system; buildcheck only ever sees the finalized transcript.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::config::{EvalConfig, DEFAULT_DIAGNOSTICS_PATH};
use crate::diagnostics::{DiagnosticRecord, DiagnosticsWriter};
use crate::evaluator::evaluate;
use crate::report::{EntryResult, RunSummary};
use crate::scenario::Scenario;

/// Heuristic transcript scoring for iterative build-fix agent scenarios.
#[derive(Parser)]
#[command(name = "buildcheck")]
#[command(about = "Score agent transcripts against behavioral checklists")]
#[command(version)]
#[command(
    long_about = "buildcheck scores the full text transcript of an automated coding-agent run \
against an ordered checklist of named behavior checks.\n\nThe built-in scenario targets an \
iterative C# build-fix task (build, read errors, edit, build again).\n\nExample usage:\n  \
buildcheck evaluate --transcript ./run.txt\n  buildcheck batch --input ./transcripts --json"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Score one transcript and write a diagnostic record.
    ///
    /// Exits non-zero when the verdict is a failure, so the command can gate
    /// CI pipelines directly.
    #[command(alias = "eval")]
    Evaluate(EvaluateArgs),

    /// Score every transcript file in a directory and print a run summary.
    Batch(BatchArgs),

    /// Print the active checklist (built-in or from a scenario file).
    Checks(ChecksArgs),
}

/// Arguments for `buildcheck evaluate`.
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Path to the transcript file to score.
    #[arg(short, long)]
    pub transcript: PathBuf,

    /// Scenario YAML defining checklist and threshold (default: built-in
    /// C# build-fix scenario).
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Override the scenario's threshold.
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Where to write the diagnostic record (overwritten each run).
    #[arg(short, long, env = "BUILDCHECK_DIAGNOSTICS", default_value = DEFAULT_DIAGNOSTICS_PATH)]
    pub diagnostics: PathBuf,

    /// Keep timestamped diagnostic history instead of overwriting.
    #[arg(long)]
    pub keep_history: bool,

    /// Skip writing the diagnostic record entirely.
    #[arg(long)]
    pub no_diagnostics: bool,

    /// Output the verdict as JSON.
    #[arg(short, long)]
    pub json: bool,
}

/// Arguments for `buildcheck batch`.
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Directory of transcript files (every regular file is scored).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Scenario YAML defining checklist and threshold (default: built-in
    /// C# build-fix scenario).
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Override the scenario's threshold.
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Output the run summary as JSON.
    #[arg(short, long)]
    pub json: bool,
}

/// Arguments for `buildcheck checks`.
#[derive(Parser, Debug)]
pub struct ChecksArgs {
    /// Scenario YAML to read the checklist from (default: built-in).
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Runs the CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Evaluate(args) => run_evaluate(args),
        Commands::Batch(args) => run_batch(args),
        Commands::Checks(args) => run_checks(args),
    }
}

fn load_scenario(path: Option<&Path>) -> anyhow::Result<Scenario> {
    match path {
        Some(p) => {
            let scenario = Scenario::load(p)
                .with_context(|| format!("Failed to load scenario from {}", p.display()))?;
            info!(id = %scenario.id, checks = scenario.checklist.len(), "Loaded scenario");
            Ok(scenario)
        }
        None => Ok(Scenario::csharp_build_fix()),
    }
}

fn run_evaluate(args: EvaluateArgs) -> anyhow::Result<()> {
    let scenario = load_scenario(args.scenario.as_deref())?;

    let mut config = EvalConfig::new()
        .with_diagnostics_path(&args.diagnostics)
        .with_history(args.keep_history);
    if let Some(t) = args.threshold {
        config = config.with_threshold(t);
    }
    let threshold = config.effective_threshold(scenario.threshold);
    anyhow::ensure!(
        (1..=scenario.checklist.len()).contains(&threshold),
        "Threshold {} out of range [1, {}]",
        threshold,
        scenario.checklist.len()
    );

    let transcript = std::fs::read_to_string(&args.transcript)
        .with_context(|| format!("Failed to read transcript {}", args.transcript.display()))?;

    let result = evaluate(&transcript, &scenario.checklist, threshold);
    info!(
        scenario = %scenario.id,
        matched = result.matched_count,
        total = result.total_count,
        success = result.success,
        "Evaluation complete"
    );

    if !args.no_diagnostics {
        let record = DiagnosticRecord::new(&transcript, &result);
        let mut writer = DiagnosticsWriter::new(&config.diagnostics_path);
        if config.keep_history {
            writer = writer.with_history();
        }
        writer.write_best_effort(&record);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{}: {}/{} checks matched (threshold {})",
            if result.success { "PASS" } else { "FAIL" },
            result.matched_count,
            result.total_count,
            threshold
        );
        for name in &result.matched_names {
            println!("  matched: {name}");
        }
    }

    if !result.success {
        let message = result
            .error_message
            .unwrap_or_else(|| "Evaluation failed".to_string());
        anyhow::bail!(message);
    }
    Ok(())
}

fn run_batch(args: BatchArgs) -> anyhow::Result<()> {
    let scenario = load_scenario(args.scenario.as_deref())?;
    let threshold = args.threshold.unwrap_or(scenario.threshold);
    anyhow::ensure!(
        (1..=scenario.checklist.len()).contains(&threshold),
        "Threshold {} out of range [1, {}]",
        threshold,
        scenario.checklist.len()
    );

    let mut paths: Vec<PathBuf> = std::fs::read_dir(&args.input)
        .with_context(|| format!("Failed to read directory {}", args.input.display()))?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    anyhow::ensure!(
        !paths.is_empty(),
        "No transcript files found in {}",
        args.input.display()
    );

    let mut entries = Vec::new();
    for path in &paths {
        let name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let transcript = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable transcript");
                continue;
            }
        };
        entries.push(EntryResult {
            name,
            result: evaluate(&transcript, &scenario.checklist, threshold),
        });
    }

    let summary = RunSummary::from_entries(scenario.id.clone(), entries);
    info!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        "Batch evaluation complete"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{}: {}/{} transcripts passed ({:.1}%)",
            summary.scenario_id,
            summary.passed,
            summary.total,
            summary.pass_rate()
        );
        for failure in summary.failures() {
            println!(
                "  FAIL {}: {}",
                failure.name,
                failure
                    .result
                    .error_message
                    .as_deref()
                    .unwrap_or("no detail")
            );
        }
    }

    if !summary.all_passed() {
        anyhow::bail!("{} of {} transcripts failed", summary.failed, summary.total);
    }
    Ok(())
}

fn run_checks(args: ChecksArgs) -> anyhow::Result<()> {
    let scenario = load_scenario(args.scenario.as_deref())?;
    println!(
        "Scenario '{}' (threshold {} of {}):",
        scenario.id,
        scenario.threshold,
        scenario.checklist.len()
    );
    print!("{}", serde_yaml::to_string(&scenario.checklist)?);
    Ok(())
}
