//! # qolab-eval
//!
//! Scoring engine for generated text.
//!
//! ## Overview
//!
//! - [`text`] - Pure text metrics (words, sentences, emoji, ad-copy detection)
//! - [`HeuristicScorer`] - Six 0-5 sub-scores computed without any model call
//! - [`LlmJudge`] / [`call_judge`] - Rubric prompt, oracle call and strict verdict parsing
//! - [`compute_final_score`] - Blends judge and heuristic totals
//!
//! ## Quick Start
//!
//! ```rust
//! use qolab_core::Constraints;
//! use qolab_eval::{SampleScores, evaluate_heuristics};
//!
//! let constraints = Constraints::with_word_range(5, 60);
//! let heuristics = evaluate_heuristics::<&str, &str>(
//!     "I rebuilt our forecast last quarter. What would you change?",
//!     &constraints,
//!     &["forecast"],
//!     &[],
//! );
//! let scores = SampleScores::heuristics_only(heuristics);
//! assert_eq!(scores.final_score, f64::from(heuristics.total()));
//! ```

pub mod aggregation;
pub mod heuristics;
pub mod judge;
pub mod lexicon;
pub mod sample;
pub mod text;

pub use aggregation::{blend_scores, compute_final_score};
pub use heuristics::{
    HeuristicScoreSet, HeuristicScorer, MAX_HEURISTIC_TOTAL, MAX_SUB_SCORE, evaluate_heuristics,
    score_brand_voice, score_clarity, score_keyword_coverage, score_length_fit, score_repetition,
    score_structure,
};
pub use judge::{
    JUDGE_SYSTEM_PROMPT, JudgeResult, JudgeVerdict, LlmJudge, LlmJudgeConfig, build_judge_prompt,
    call_judge, parse_judge_response,
};
pub use lexicon::{DEFAULT_CTA_PHRASES, Lexicon};
pub use sample::{Sample, SampleScores};
