//! # qolab-cli
//!
//! Experiment runner behind the `qolab` binary.
//!
//! ## Overview
//!
//! - [`Experiment`] - Generates and scores every prompt variant at every temperature
//! - [`run_experiment`] - Loads configs, runs an experiment and saves `results.json`
//! - [`render_summary_markdown`] - Writes a ranked Markdown summary of a saved run
//!
//! ## Commands
//!
//! - `qolab run --case <path> --suite <path> [--dry-run] [--use-judge] ...`
//! - `qolab report --run <results.json>`

pub mod cli;
pub mod config;
pub mod pipeline;
pub mod store;
pub mod summary;

pub use config::{DEFAULT_RUBRIC_PATH, EnvConfig, RunOptions};
pub use pipeline::{Experiment, TEMPERATURES, make_run_id, run_experiment};
pub use store::{RunMetadata, RunResults, load_run, save_run};
pub use summary::{render_summary_markdown, summary_markdown};
