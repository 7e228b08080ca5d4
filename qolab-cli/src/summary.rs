//! Markdown run summary.

use crate::store::{RunResults, load_run};
use anyhow::{Context, Result};
use qolab_eval::{JudgeResult, Sample};
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE: &str = "summary.md";
const TOP_OUTPUTS: usize = 3;

/// Checks that flag a problem: `*_present` reported true or `*_ok` reported false. Sorted by name.
fn failed_checks(judge: &JudgeResult) -> Vec<&str> {
    let Some(verdict) = judge.verdict() else {
        return Vec::new();
    };
    // BTreeMap iteration is already sorted
    verdict
        .checks
        .iter()
        .filter(|(name, value)| {
            (name.ends_with("_present") && **value) || (name.ends_with("_ok") && !**value)
        })
        .map(|(name, _)| name.as_str())
        .collect()
}

fn format_total(total: Option<f64>) -> String {
    total.map(|t| format!("{t:.1}")).unwrap_or_default()
}

fn join_temperatures(temperatures: &[f64]) -> String {
    temperatures
        .iter()
        .map(|t| format!("{t:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the summary for a loaded run. Samples are ranked by final score, highest first;
/// ties keep their original order.
pub fn summary_markdown(run: &RunResults) -> String {
    let mut samples: Vec<&Sample> = run.samples.iter().collect();
    samples.sort_by(|a, b| b.final_score().total_cmp(&a.final_score()));

    let meta = &run.metadata;
    let mut lines: Vec<String> = vec![
        format!("# Run Summary: {}", meta.run_id),
        String::new(),
        "## Metadata".to_string(),
        format!("- Case: **{}**", meta.case_name()),
        format!("- Generator model: `{}`", meta.generator_model),
    ];
    if meta.used_judge {
        let judge_model = meta.judge_model.as_deref().unwrap_or("");
        lines.push(format!("- Judge model: `{judge_model}`"));
    }
    let temperatures = join_temperatures(&meta.temperatures);
    lines.push(format!("- Temperatures: {temperatures}"));
    lines.push(format!("- Variants: {}", meta.variants.join(", ")));
    lines.push(format!("- Judge enabled: {}", meta.used_judge));
    lines.push(String::new());

    lines.push("## Scores Overview".to_string());
    lines.push(String::new());
    lines.push("| Variant | Temp | Heuristics | Judge | Final |".to_string());
    lines.push("|---|---|---|---|---|".to_string());
    for sample in &samples {
        lines.push(format!(
            "| {} | {:.1} | {:.1} | {} | {:.1} |",
            sample.variant_name,
            sample.temperature,
            f64::from(sample.scores.heuristics.total()),
            format_total(sample.scores.judge_total()),
            sample.final_score(),
        ));
    }

    lines.push(String::new());
    lines.push("## Top 3 Outputs".to_string());
    lines.push(String::new());

    for (rank, sample) in samples.iter().take(TOP_OUTPUTS).enumerate() {
        let position = rank + 1;
        let variant = &sample.variant_name;
        let temperature = sample.temperature;
        lines.push(format!("### #{position}: {variant} @ temp={temperature:?}"));
        lines.push(String::new());
        lines.push(format!("- Final score: {:.1}", sample.final_score()));
        let heuristics_total = f64::from(sample.scores.heuristics.total());
        lines.push(format!("- Heuristics total: {heuristics_total:.1}"));
        if let Some(judge) = &sample.scores.judge {
            lines.push(format!("- Judge total: {}", format_total(judge.total())));
            let failed = failed_checks(judge);
            if !failed.is_empty() {
                lines.push(format!("- Failed checks: {}", failed.join(", ")));
            }
            if let Some(error) = judge.error() {
                lines.push(format!("- Judge error: {error}"));
            }
        }
        lines.push(String::new());
        lines.push("#### Output".to_string());
        lines.push(String::new());
        lines.push(sample.output_text.trim().to_string());
        lines.push(String::new());
        lines.push("#### Heuristics breakdown".to_string());
        lines.push(String::new());
        for (name, value) in sample.scores.heuristics.breakdown() {
            lines.push(format!("- **{name}**: {value}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Loads `results_path` and writes its summary, by default to `summary.md` beside it.
pub fn render_summary_markdown(results_path: &Path, output_path: Option<&Path>) -> Result<PathBuf> {
    let run = load_run(results_path)?;
    let summary_path = match output_path {
        Some(path) => path.to_path_buf(),
        None => results_path.with_file_name(SUMMARY_FILE),
    };
    if let Some(parent) = summary_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&summary_path, summary_markdown(&run))
        .with_context(|| format!("failed to write {}", summary_path.display()))?;
    tracing::info!(path = %summary_path.display(), "Summary written");
    Ok(summary_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RunMetadata;
    use qolab_core::Constraints;
    use qolab_eval::{SampleScores, evaluate_heuristics, parse_judge_response};
    use serde_json::json;

    fn sample(variant: &str, temperature: f64, text: &str, judge: Option<&str>) -> Sample {
        let constraints = Constraints::with_word_range(3, 40);
        let heuristics = evaluate_heuristics::<&str, &str>(text, &constraints, &[], &[]);
        let used_judge = judge.is_some();
        Sample {
            variant_name: variant.to_string(),
            temperature,
            full_prompt: String::new(),
            output_text: format!("  {text}\n"),
            scores: SampleScores::new(heuristics, judge.map(parse_judge_response), used_judge),
        }
    }

    fn run(samples: Vec<Sample>, used_judge: bool) -> RunResults {
        RunResults {
            metadata: RunMetadata {
                run_id: "2026-01-02_030405_demo".to_string(),
                created_at: String::new(),
                case: json!({"name": "demo"}),
                suite: json!({}),
                generator_model: "gpt-4.1-mini".to_string(),
                judge_model: used_judge.then(|| "judge-m".to_string()),
                used_judge,
                temperatures: vec![0.2, 0.7, 1.0],
                variants: vec!["A".to_string(), "B".to_string()],
            },
            samples,
        }
    }

    #[test]
    fn metadata_block_and_ranking() {
        let low = sample("A", 0.2, "Buy now", None);
        let text = "I rebuilt my forecast process this year. What would you change?";
        let high = sample("B", 1.0, text, None);
        let markdown = summary_markdown(&run(vec![low, high], false));

        let header = "# Run Summary: 2026-01-02_030405_demo\n\n## Metadata\n- Case: **demo**\n";
        assert!(markdown.starts_with(header));
        assert!(markdown.contains("- Temperatures: 0.2, 0.7, 1.0"));
        assert!(markdown.contains("- Variants: A, B"));
        assert!(markdown.contains("- Judge enabled: false"));
        assert!(!markdown.contains("Judge model"));

        let b_row = markdown.find("| B | 1.0 |").unwrap();
        let a_row = markdown.find("| A | 0.2 |").unwrap();
        assert!(b_row < a_row);
        assert!(markdown.contains("### #1: B @ temp=1.0"));
        assert!(markdown.contains(&format!("#### Output\n\n{text}\n")));
        assert!(markdown.contains("- **length_fit**:"));
        assert!(!markdown.contains("- **total_heuristics**"));
    }

    #[test]
    fn judge_details_and_failed_checks() {
        let verdict = json!({
            "checks": {
                "word_range_ok": false,
                "emoji_limit_ok": true,
                "banned_phrases_present": true
            },
            "total_judge": 12
        })
        .to_string();
        let judged = sample("A", 0.7, "Short post here.", Some(&verdict));
        let failed = sample("B", 0.2, "Other post here.", Some("nope"));
        let markdown = summary_markdown(&run(vec![judged, failed], true));

        assert!(markdown.contains("- Judge model: `judge-m`"));
        assert!(markdown.contains("- Judge total: 12.0"));
        assert!(markdown.contains("- Failed checks: banned_phrases_present, word_range_ok"));
        assert!(markdown.contains("- Judge error: Failed to parse judge JSON:"));
        assert!(markdown.contains("| B | 0.2 |"));
    }

    #[test]
    fn writes_summary_next_to_results() {
        let dir = tempfile::tempdir().unwrap();
        let results = run(vec![sample("A", 0.2, "Some text here.", None)], false);
        let results_path = crate::store::save_run(&results, dir.path()).unwrap();

        let summary_path = render_summary_markdown(&results_path, None).unwrap();
        assert_eq!(summary_path, results_path.with_file_name("summary.md"));
        let content = std::fs::read_to_string(summary_path).unwrap();
        assert!(content.contains("| A | 0.2 |"));
    }
}
