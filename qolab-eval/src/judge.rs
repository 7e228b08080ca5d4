//! LLM-as-judge protocol
//!
//! Builds a rubric prompt, asks an external oracle for a strict-JSON verdict and validates
//! whatever text comes back. The oracle is untrusted: every call ends in exactly one of the two
//! [`JudgeResult`] states and never in an error.

use qolab_core::{Constraints, Content, GenerateContentConfig, JudgeRubric, Llm, LlmRequest};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::Instrument;

pub const JUDGE_SYSTEM_PROMPT: &str = "You are an impartial writing quality judge for LinkedIn \
posts. Respond ONLY with strict JSON, no commentary.";

/// Boolean checks the judge must report.
pub const JUDGE_CHECKS: [&str; 8] = [
    "word_range_ok",
    "emoji_limit_ok",
    "exclamation_limit_ok",
    "banned_phrases_present",
    "first_person_present",
    "feels_like_ad_copy",
    "fabricated_metrics_present",
    "ends_with_audience_question",
];

/// Scored categories, each 0-5.
pub const JUDGE_CATEGORIES: [&str; 6] = [
    "instruction_following",
    "clarity_structure",
    "tone_voice",
    "usefulness",
    "conciseness",
    "non_repetition",
];

pub const MAX_CATEGORY_SCORE: u8 = 5;
pub const MAX_JUDGE_TOTAL: f64 = 30.0;

/// Configuration for the judge call.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmJudgeConfig {
    /// Maximum tokens for the judge response
    pub max_tokens: u32,
    /// Sampling temperature; zero asks for deterministic output
    pub temperature: f32,
}

impl Default for LlmJudgeConfig {
    fn default() -> Self {
        Self {
            max_tokens: 400,
            temperature: 0.0,
        }
    }
}

/// A validated judge verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeVerdict {
    pub checks: BTreeMap<String, bool>,
    pub scores: BTreeMap<String, u8>,
    pub rationales: BTreeMap<String, String>,
    /// Absent only when the judge sent neither a total nor any scores.
    pub total_judge: Option<f64>,
    pub raw_judge: String,
}

/// Outcome of one judge invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JudgeResult {
    Parsed(JudgeVerdict),
    /// Nothing usable came back. Scores are unknown, not zero.
    ParseFailed {
        judge_error: String,
        raw_judge: String,
    },
}

impl JudgeResult {
    pub fn is_parsed(&self) -> bool {
        matches!(self, JudgeResult::Parsed(_))
    }

    pub fn verdict(&self) -> Option<&JudgeVerdict> {
        match self {
            JudgeResult::Parsed(verdict) => Some(verdict),
            JudgeResult::ParseFailed { .. } => None,
        }
    }

    pub fn total(&self) -> Option<f64> {
        self.verdict().and_then(|v| v.total_judge)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            JudgeResult::Parsed(_) => None,
            JudgeResult::ParseFailed { judge_error, .. } => Some(judge_error),
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            JudgeResult::Parsed(verdict) => &verdict.raw_judge,
            JudgeResult::ParseFailed { raw_judge, .. } => raw_judge,
        }
    }
}

#[derive(Deserialize)]
struct RawVerdict {
    #[serde(default)]
    checks: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    scores: Option<BTreeMap<String, Number>>,
    #[serde(default)]
    rationales: Option<BTreeMap<String, String>>,
    #[serde(default)]
    total_judge: Option<f64>,
}

fn category_score(name: &str, value: &Number) -> Result<u8, String> {
    let integral = match (value.as_u64(), value.as_f64()) {
        (Some(v), _) => Some(v),
        (None, Some(f)) if f.fract() == 0.0 && f >= 0.0 => Some(f as u64),
        _ => None,
    };
    match integral {
        Some(v) if v <= u64::from(MAX_CATEGORY_SCORE) => Ok(v as u8),
        _ => Err(format!(
            "score `{name}` = {value} is not an integer in 0..={MAX_CATEGORY_SCORE}"
        )),
    }
}

fn validate(raw: RawVerdict, raw_text: &str) -> Result<JudgeVerdict, String> {
    let scores = raw
        .scores
        .unwrap_or_default()
        .iter()
        .map(|(name, value)| category_score(name, value).map(|score| (name.clone(), score)))
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    let total_judge = match raw.total_judge {
        Some(total) => Some(total),
        None if !scores.is_empty() => Some(scores.values().map(|&v| f64::from(v)).sum()),
        None => None,
    };
    if let Some(total) = total_judge {
        if !(0.0..=MAX_JUDGE_TOTAL).contains(&total) {
            return Err(format!("total_judge = {total} is outside 0..={MAX_JUDGE_TOTAL}"));
        }
    }

    Ok(JudgeVerdict {
        checks: raw.checks.unwrap_or_default(),
        scores,
        rationales: raw.rationales.unwrap_or_default(),
        total_judge,
        raw_judge: raw_text.to_string(),
    })
}

/// Parses raw judge output into a [`JudgeResult`].
///
/// `checks`, `scores` and `rationales` default to empty when absent. A missing `total_judge`
/// is recomputed from the scores. Malformed JSON, wrong field types or out-of-range numbers
/// produce [`JudgeResult::ParseFailed`].
pub fn parse_judge_response(raw: &str) -> JudgeResult {
    let outcome = serde_json::from_str::<RawVerdict>(raw)
        .map_err(|e| e.to_string())
        .and_then(|parsed| validate(parsed, raw));

    match outcome {
        Ok(verdict) => JudgeResult::Parsed(verdict),
        Err(reason) => {
            tracing::warn!(error = %reason, "Judge response rejected");
            JudgeResult::ParseFailed {
                judge_error: format!("Failed to parse judge JSON: {reason}"),
                raw_judge: raw.to_string(),
            }
        }
    }
}

/// Builds the user prompt sent to the judge.
pub fn build_judge_prompt<S: AsRef<str>>(
    rubric: &JudgeRubric,
    case_description: &str,
    constraints: &Constraints,
    keywords: &[S],
    output_text: &str,
) -> String {
    let banned = &constraints.banned_phrases;
    let keywords: Vec<&str> = keywords.iter().map(AsRef::as_ref).collect();
    let checklist = [
        format!(
            "- Word range: {}–{} words.",
            constraints.min_words, constraints.max_words
        ),
        format!("- Max emojis: {}.", constraints.max_emojis),
        format!(
            "- Max exclamation marks: {}.",
            constraints.max_exclamation_marks
        ),
        format!("- Banned phrases must not appear: {banned:?}."),
        format!(
            "- Prefer first-person voice: {}.",
            constraints.prefer_first_person
        ),
        format!(
            "- Avoid salesy ad copy: {}.",
            constraints.avoid_salesy_ad_copy
        ),
        format!(
            "- Prefer ending with a light audience question: {}.",
            constraints.prefer_question_ending
        ),
        format!(
            "- No fabricated metrics (percentages, timeframes) if no_fabricated_metrics is true: {}.",
            constraints.no_fabricated_metrics
        ),
        format!("- Keywords are nice-to-have only: {keywords:?}."),
    ]
    .join("\n");

    let checks_schema = JUDGE_CHECKS
        .iter()
        .map(|name| format!("    \"{name}\": true/false"))
        .collect::<Vec<_>>()
        .join(",\n");
    let scores_schema = JUDGE_CATEGORIES
        .iter()
        .map(|name| format!("    \"{name}\": 0-5"))
        .collect::<Vec<_>>()
        .join(",\n");
    let rationales_schema = JUDGE_CATEGORIES
        .iter()
        .map(|name| format!("    \"{name}\": \"one short sentence\""))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"{rubric_text}

CASE CONTEXT:
{case_description}

CONSTRAINT CHECKLIST (verify explicitly):
{checklist}

CANDIDATE OUTPUT:
{output_text}

When scoring, apply these HARD rules:
- If feels_like_ad_copy is true, then tone_voice must be <= 2 and usefulness must be <= 2.
- If fabricated_metrics_present is true and no_fabricated_metrics is true, then instruction_following must be <= 2.
- Scores of 5 must be rare and require excellence on that category.

Return STRICT JSON with EXACTLY these top-level keys: checks, scores, rationales, total_judge.
No markdown, no commentary, no extra keys.

The JSON schema is:
{{
  "checks": {{
{checks_schema}
  }},
  "scores": {{
{scores_schema}
  }},
  "rationales": {{
{rationales_schema}
  }},
  "total_judge": 0-30
}}"#,
        rubric_text = rubric.instructions.join("\n"),
    )
}

/// LLM-based judge bound to one oracle and model name.
pub struct LlmJudge {
    oracle: Arc<dyn Llm>,
    model: String,
    config: LlmJudgeConfig,
}

impl LlmJudge {
    pub fn new(oracle: Arc<dyn Llm>, model: impl Into<String>) -> Self {
        Self::with_config(oracle, model, LlmJudgeConfig::default())
    }

    pub fn with_config(
        oracle: Arc<dyn Llm>,
        model: impl Into<String>,
        config: LlmJudgeConfig,
    ) -> Self {
        Self {
            oracle,
            model: model.into(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Judges one candidate text. Never fails: transport errors become
    /// [`JudgeResult::ParseFailed`] with an empty raw body.
    pub async fn evaluate<S: AsRef<str>>(
        &self,
        rubric: &JudgeRubric,
        case_description: &str,
        constraints: &Constraints,
        keywords: &[S],
        output_text: &str,
    ) -> JudgeResult {
        let prompt = build_judge_prompt(
            rubric,
            case_description,
            constraints,
            keywords,
            output_text,
        );
        let span = qolab_telemetry::judge_call_span(&self.model);
        async move {
            match self.call_oracle(prompt).await {
                Ok(raw) => parse_judge_response(&raw),
                Err(e) => {
                    tracing::warn!(error = %e, "Judge call failed; using heuristics only");
                    JudgeResult::ParseFailed {
                        judge_error: format!("judge call failed: {e}"),
                        raw_judge: String::new(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn call_oracle(&self, prompt: String) -> qolab_core::Result<String> {
        let contents = vec![Content::system(JUDGE_SYSTEM_PROMPT), Content::user(prompt)];
        let config = GenerateContentConfig {
            temperature: Some(self.config.temperature),
            max_output_tokens: Some(self.config.max_tokens),
        };
        let request = LlmRequest::new(self.model.clone(), contents).with_config(config);

        let response = self.oracle.generate_content(request).await?;
        Ok(response.text_or_empty().to_string())
    }
}

/// One-shot judge call with the default configuration.
pub async fn call_judge<S: AsRef<str>>(
    oracle: Arc<dyn Llm>,
    model: &str,
    rubric: &JudgeRubric,
    case_description: &str,
    constraints: &Constraints,
    keywords: &[S],
    output_text: &str,
) -> JudgeResult {
    LlmJudge::new(oracle, model)
        .evaluate(rubric, case_description, constraints, keywords, output_text)
        .await
}
