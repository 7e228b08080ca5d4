//! JSON run store: one directory per run holding `results.json`.

use anyhow::{Context, Result};
use qolab_eval::Sample;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const RESULTS_FILE: &str = "results.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: String,
    /// RFC 3339 timestamp in UTC.
    pub created_at: String,
    /// The case config as loaded.
    pub case: Value,
    pub suite: Value,
    pub generator_model: String,
    /// Set only when the judge ran.
    pub judge_model: Option<String>,
    pub used_judge: bool,
    pub temperatures: Vec<f64>,
    pub variants: Vec<String>,
}

impl RunMetadata {
    pub fn case_name(&self) -> &str {
        self.case.get("name").and_then(Value::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    pub metadata: RunMetadata,
    #[serde(default)]
    pub samples: Vec<Sample>,
}

/// Writes `<runs_dir>/<run_id>/results.json` (pretty-printed) and returns its path.
pub fn save_run(results: &RunResults, runs_dir: &Path) -> Result<PathBuf> {
    let run_dir = runs_dir.join(&results.metadata.run_id);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create run directory {}", run_dir.display()))?;

    let path = run_dir.join(RESULTS_FILE);
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

pub fn load_run(path: &Path) -> Result<RunResults> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid results file {}", path.display()))
}
