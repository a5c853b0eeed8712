//! Scenario definitions: one fixed task plus its scoring checklist.
//!
//! A scenario binds a user-visible question to an ordered checklist and a
//! threshold. Scenarios are plain YAML so checklists can be reused across
//! other iterative-task scenarios without modifying the evaluator.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ScenarioError;
use crate::evaluator::{default_checklist, BehaviorCheck, DEFAULT_THRESHOLD};

/// One fixed task definition against which an agent transcript is scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable identifier, used in reports and container/file naming.
    pub id: String,
    /// The question shown to the agent under evaluation.
    pub question: String,
    /// Ordered behavior checklist applied to the transcript.
    pub checklist: Vec<BehaviorCheck>,
    /// Minimum matched checks for a successful verdict.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

fn default_threshold() -> usize {
    DEFAULT_THRESHOLD
}

impl Scenario {
    /// The built-in iterative C# build-fix scenario.
    pub fn csharp_build_fix() -> Self {
        Self {
            id: "csharp-build-fix".to_string(),
            question: "Fix the C# build errors in this project. Build, read the errors, \
                       edit the sources, and build again until it compiles."
                .to_string(),
            checklist: default_checklist(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Loads a scenario from a YAML file and validates it.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        if !path.exists() {
            return Err(ScenarioError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let scenario: Scenario =
            serde_yaml::from_str(&content).map_err(|e| ScenarioError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks the structural invariants the evaluator relies on.
    ///
    /// The pure `evaluate` function is total; this is the gate that keeps
    /// out-of-range thresholds and empty checklists from ever reaching it.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.id.trim().is_empty() {
            return Err(ScenarioError::EmptyId);
        }
        if self.checklist.is_empty() {
            return Err(ScenarioError::EmptyChecklist(self.id.clone()));
        }
        if self.threshold < 1 || self.threshold > self.checklist.len() {
            return Err(ScenarioError::InvalidThreshold {
                id: self.id.clone(),
                threshold: self.threshold,
                checks: self.checklist.len(),
            });
        }
        Ok(())
    }
}

/// Discovers all `*.yaml`/`*.yml` scenario files under a directory,
/// recursively, sorted for deterministic ordering.
pub fn discover_scenarios(input_dir: &Path) -> Result<Vec<PathBuf>, ScenarioError> {
    let mut paths = Vec::new();
    fn walk(dir: &Path, paths: &mut Vec<PathBuf>) {
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_dir() {
                    walk(&p, paths);
                } else if matches!(
                    p.extension().and_then(|e| e.to_str()),
                    Some("yaml") | Some("yml")
                ) {
                    paths.push(p);
                }
            }
        }
    }
    if !input_dir.exists() {
        return Err(ScenarioError::NotFound(input_dir.display().to_string()));
    }
    walk(input_dir, &mut paths);
    paths.sort();
    Ok(paths)
}

/// Loads every discovered scenario, skipping files that fail to parse or
/// validate (with a warning), mirroring how batch runs tolerate stray YAML.
pub fn load_all(input_dir: &Path) -> Result<Vec<Scenario>, ScenarioError> {
    let mut scenarios = Vec::new();
    for path in discover_scenarios(input_dir)? {
        match Scenario::load(&path) {
            Ok(s) => scenarios.push(s),
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping invalid scenario file"),
        }
    }
    Ok(scenarios)
}
