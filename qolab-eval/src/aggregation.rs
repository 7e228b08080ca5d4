//! Final score aggregation.

use crate::sample::SampleScores;

pub const JUDGE_WEIGHT: f64 = 0.6;
pub const HEURISTICS_WEIGHT: f64 = 0.4;

/// Blends judge and heuristic totals.
///
/// Returns `0.6 * judge + 0.4 * heuristics` when the judge was enabled for the run and produced
/// a total, and the heuristic total otherwise. Both inputs live on 0-30, so the result does too.
pub fn blend_scores(heuristics_total: f64, judge_total: Option<f64>, used_judge: bool) -> f64 {
    match judge_total {
        Some(judge) if used_judge => JUDGE_WEIGHT * judge + HEURISTICS_WEIGHT * heuristics_total,
        _ => heuristics_total,
    }
}

/// Recomputes the final score of a scored sample.
pub fn compute_final_score(scores: &SampleScores, used_judge: bool) -> f64 {
    blend_scores(
        f64::from(scores.heuristics.total()),
        scores.judge.as_ref().and_then(|judge| judge.total()),
        used_judge,
    )
}
