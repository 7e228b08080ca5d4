//! Scored samples as they appear in a run's results.

use crate::aggregation::blend_scores;
use crate::heuristics::HeuristicScoreSet;
use crate::judge::JudgeResult;
use serde::{Deserialize, Serialize};

/// Scores attached to one generated output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleScores {
    pub heuristics: HeuristicScoreSet,
    /// `None` when the judge was disabled for the run.
    pub judge: Option<JudgeResult>,
    pub final_score: f64,
}

impl SampleScores {
    pub fn new(
        heuristics: HeuristicScoreSet,
        judge: Option<JudgeResult>,
        used_judge: bool,
    ) -> Self {
        let final_score = blend_scores(
            f64::from(heuristics.total()),
            judge.as_ref().and_then(JudgeResult::total),
            used_judge,
        );
        Self {
            heuristics,
            judge,
            final_score,
        }
    }

    pub fn heuristics_only(heuristics: HeuristicScoreSet) -> Self {
        Self::new(heuristics, None, false)
    }

    pub fn judge_total(&self) -> Option<f64> {
        self.judge.as_ref().and_then(JudgeResult::total)
    }
}

/// One generated output for a (variant, temperature) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub variant_name: String,
    pub temperature: f64,
    pub full_prompt: String,
    pub output_text: String,
    pub scores: SampleScores,
}

impl Sample {
    pub fn final_score(&self) -> f64 {
        self.scores.final_score
    }
}
