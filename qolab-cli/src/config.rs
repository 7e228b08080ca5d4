use crate::cli::RunArgs;
use anyhow::{Result, bail};
use qolab_model::openai::{DEFAULT_MODEL, DEFAULT_TIMEOUT};
use qolab_model::{OpenAIClient, OpenAIConfig};
use std::path::PathBuf;

/// Rubric used when `--rubric` is not given.
pub const DEFAULT_RUBRIC_PATH: &str = "configs/rubrics/judge_rubric_v1.json";

/// Settings read from the environment (and a `.env` file, if present).
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_key: non_empty("OPENAI_API_KEY"),
            base_url: non_empty("OPENAI_BASE_URL"),
        }
    }

    /// Builds a chat-completions client for `model`. Fails without an API key.
    pub fn openai_client(&self, model: &str, purpose: &str) -> Result<OpenAIClient> {
        let Some(api_key) = &self.api_key else {
            bail!("OPENAI_API_KEY is required for {purpose}");
        };
        let mut config = OpenAIConfig::new(api_key.clone(), model).with_timeout(DEFAULT_TIMEOUT);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        Ok(OpenAIClient::new(config)?)
    }
}

/// Resolved options for one experiment run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub case_path: PathBuf,
    pub suite_path: PathBuf,
    pub runs_dir: PathBuf,
    pub dry_run: bool,
    pub use_judge: bool,
    pub generator_model: String,
    pub judge_model: String,
    pub rubric_path: PathBuf,
    pub concurrency: usize,
}

impl From<RunArgs> for RunOptions {
    fn from(args: RunArgs) -> Self {
        let default_model = || DEFAULT_MODEL.to_string();
        Self {
            case_path: args.case,
            suite_path: args.suite,
            runs_dir: args.runs_dir,
            dry_run: args.dry_run,
            use_judge: args.use_judge,
            generator_model: args.model.unwrap_or_else(default_model),
            judge_model: args.judge_model.unwrap_or_else(default_model),
            rubric_path: args.rubric.unwrap_or_else(|| DEFAULT_RUBRIC_PATH.into()),
            concurrency: usize::from(args.concurrency).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_config_error() {
        let env = EnvConfig::default();
        let result = env.openai_client("gpt-4.1-mini", "--use-judge");
        let message = result.err().unwrap().to_string();
        assert!(message.contains("OPENAI_API_KEY is required for --use-judge"));
    }

    #[test]
    fn options_fill_defaults() {
        let args = RunArgs {
            case: "c.json".into(),
            suite: "s.json".into(),
            runs_dir: "runs".into(),
            dry_run: true,
            use_judge: false,
            model: None,
            judge_model: Some("judge-x".to_string()),
            rubric: None,
            concurrency: 4,
        };
        let options = RunOptions::from(args);
        assert_eq!(options.generator_model, "gpt-4.1-mini");
        assert_eq!(options.judge_model, "judge-x");
        assert_eq!(options.rubric_path, PathBuf::from(DEFAULT_RUBRIC_PATH));
        assert_eq!(options.concurrency, 4);
    }
}
