//! Experiment pipeline: variants × temperatures → generate → score → aggregate.

use crate::config::{EnvConfig, RunOptions};
use crate::store::{RunMetadata, RunResults, save_run};
use anyhow::{Context, Result, bail};
use futures::{StreamExt, TryStreamExt, stream};
use qolab_core::{CaseConfig, JudgeRubric, PromptSuite, PromptVariant};
use qolab_eval::{DEFAULT_CTA_PHRASES, LlmJudge, Sample, SampleScores, evaluate_heuristics};
use qolab_model::{DryRunGenerator, GenerationRequest, Generator, LlmGenerator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;

/// Sampling temperatures tried for every variant, in run order.
pub const TEMPERATURES: [f64; 3] = [0.2, 0.7, 1.0];

/// A fully resolved experiment, ready to run.
pub struct Experiment {
    case: CaseConfig,
    suite: PromptSuite,
    keywords: Vec<String>,
    generator: Arc<dyn Generator>,
    judge: Option<(LlmJudge, JudgeRubric)>,
    concurrency: usize,
}

impl Experiment {
    pub fn new(
        case: CaseConfig,
        suite: PromptSuite,
        keywords: Vec<String>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            case,
            suite,
            keywords,
            generator,
            judge: None,
            concurrency: 1,
        }
    }

    #[must_use]
    pub fn with_judge(mut self, judge: LlmJudge, rubric: JudgeRubric) -> Self {
        self.judge = Some((judge, rubric));
        self
    }

    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn uses_judge(&self) -> bool {
        self.judge.is_some()
    }

    /// Generates and scores every variant × temperature pair. Samples come back in
    /// variant-major order regardless of concurrency.
    pub async fn run(&self) -> Result<Vec<Sample>> {
        let jobs: Vec<(&PromptVariant, f64)> = self
            .suite
            .variants
            .iter()
            .flat_map(|variant| TEMPERATURES.iter().map(move |&t| (variant, t)))
            .collect();

        tracing::info!(
            case = %self.case.name,
            samples = jobs.len(),
            concurrency = self.concurrency,
            judge = self.uses_judge(),
            "Running experiment"
        );

        stream::iter(jobs)
            .map(|(variant, temperature)| self.evaluate_sample(variant, temperature))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    async fn evaluate_sample(&self, variant: &PromptVariant, temperature: f64) -> Result<Sample> {
        let span = qolab_telemetry::sample_span(&variant.name, temperature);
        async move {
            let user_prompt = variant.render_user_prompt(&self.case);
            let full_prompt = variant.full_prompt(&user_prompt);
            let request = GenerationRequest {
                case_name: self.case.name.clone(),
                variant_name: variant.name.clone(),
                system_prompt: variant.system_prompt.clone(),
                user_prompt,
                temperature,
            };

            let model_name = self.generator.model_name();
            let generation_span = qolab_telemetry::generation_span(model_name, temperature);
            let output_text = self
                .generator
                .generate(&request)
                .instrument(generation_span)
                .await
                .with_context(|| {
                    format!(
                        "generation failed for variant '{}' at temperature {temperature}",
                        variant.name
                    )
                })?;

            let heuristics = evaluate_heuristics(
                &output_text,
                &self.case.constraints,
                &self.keywords,
                DEFAULT_CTA_PHRASES,
            );

            let judge = match &self.judge {
                Some((judge, rubric)) => Some(
                    judge
                        .evaluate(
                            rubric,
                            &self.case.description(),
                            &self.case.constraints,
                            &self.keywords,
                            &output_text,
                        )
                        .await,
                ),
                None => None,
            };

            let scores = SampleScores::new(heuristics, judge, self.uses_judge());
            tracing::info!(
                heuristics = scores.heuristics.total(),
                judge = ?scores.judge_total(),
                final_score = scores.final_score,
                "Sample scored"
            );

            Ok(Sample {
                variant_name: variant.name.clone(),
                temperature,
                full_prompt,
                output_text,
                scores,
            })
        }
        .instrument(span)
        .await
    }
}

/// `<UTC %Y-%m-%d_%H%M%S>_<case slug>`
pub fn make_run_id(now: chrono::DateTime<chrono::Utc>, case: &CaseConfig) -> String {
    format!("{}_{}", now.format("%Y-%m-%d_%H%M%S"), case.slug())
}

/// Loads configs, builds the generator and optional judge, runs every sample and saves
/// `results.json`. Returns the path of the saved results.
///
/// Missing credentials are reported before any generation starts.
pub async fn run_experiment(options: &RunOptions, env: &EnvConfig) -> Result<PathBuf> {
    let case = CaseConfig::load(&options.case_path)
        .with_context(|| format!("loading case {}", options.case_path.display()))?;
    let suite = PromptSuite::load(&options.suite_path)
        .with_context(|| format!("loading suite {}", options.suite_path.display()))?;
    let keywords = case.load_keywords().context("loading keywords")?;

    if options.use_judge && env.api_key.is_none() {
        bail!("OPENAI_API_KEY is required when using --use-judge");
    }

    let generator: Arc<dyn Generator> = if options.dry_run {
        Arc::new(DryRunGenerator)
    } else {
        let client = env.openai_client(&options.generator_model, "generation (or pass --dry-run)")?;
        Arc::new(LlmGenerator::new(Arc::new(client), options.generator_model.clone()))
    };

    let mut experiment = Experiment::new(case.clone(), suite.clone(), keywords, generator)
        .with_concurrency(options.concurrency);
    if options.use_judge {
        let rubric = JudgeRubric::load(&options.rubric_path)
            .with_context(|| format!("loading rubric {}", options.rubric_path.display()))?;
        let oracle = env.openai_client(&options.judge_model, "--use-judge")?;
        let judge = LlmJudge::new(Arc::new(oracle), options.judge_model.clone());
        experiment = experiment.with_judge(judge, rubric);
    }

    let now = chrono::Utc::now();
    let run_id = make_run_id(now, &case);
    let samples = experiment
        .run()
        .instrument(qolab_telemetry::run_span(&run_id, &case.name))
        .await?;

    let results = RunResults {
        metadata: RunMetadata {
            run_id,
            created_at: now.to_rfc3339(),
            case: serde_json::to_value(&case)?,
            suite: serde_json::to_value(&suite)?,
            generator_model: if options.dry_run {
                DryRunGenerator.model_name().to_string()
            } else {
                options.generator_model.clone()
            },
            judge_model: options.use_judge.then(|| options.judge_model.clone()),
            used_judge: options.use_judge,
            temperatures: TEMPERATURES.to_vec(),
            variants: suite.variants.iter().map(|v| v.name.clone()).collect(),
        },
        samples,
    };

    let path = save_run(&results, &options.runs_dir)?;
    tracing::info!(path = %path.display(), samples = results.samples.len(), "Results saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use qolab_core::Constraints;

    #[test]
    fn run_id_uses_utc_timestamp_and_slug() {
        let case = CaseConfig {
            name: "LinkedIn B2B SaaS".to_string(),
            task: String::new(),
            audience: String::new(),
            tone: String::new(),
            constraints: Constraints::with_word_range(1, 2),
            keywords_file: String::new(),
        };
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(
            make_run_id(now, &case),
            "2026-03-04_050607_linkedin_b2b_saas"
        );
    }
}
