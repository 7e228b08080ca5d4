use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qolab")]
#[command(
    about = "AI output quality lab: generate, score and compare prompt variants",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an experiment and write results plus a Markdown summary
    Run(RunArgs),

    /// Regenerate the Markdown summary from a saved results.json
    Report {
        /// Path to results.json
        #[arg(long)]
        run: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to the case JSON config
    #[arg(long)]
    pub case: PathBuf,

    /// Path to the prompt suite JSON
    #[arg(long)]
    pub suite: PathBuf,

    /// Directory where run folders are stored
    #[arg(long, default_value = "runs")]
    pub runs_dir: PathBuf,

    /// Use canned outputs instead of calling a model (no API key required)
    #[arg(long)]
    pub dry_run: bool,

    /// Score every sample with an LLM judge (requires OPENAI_API_KEY)
    #[arg(long)]
    pub use_judge: bool,

    /// Generator model
    #[arg(long)]
    pub model: Option<String>,

    /// Judge model
    #[arg(long)]
    pub judge_model: Option<String>,

    /// Path to the judge rubric JSON
    #[arg(long)]
    pub rubric: Option<PathBuf>,

    /// Samples evaluated concurrently
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,
}
