//! # qolab-model
//!
//! Oracle clients and candidate-text generators.
//!
//! ## Overview
//!
//! - [`OpenAIClient`] - Chat-completions client for OpenAI-compatible endpoints
//! - [`LlmGenerator`] - Generates candidate text through any [`qolab_core::Llm`]
//! - [`DryRunGenerator`] - Deterministic canned outputs for offline runs
//! - [`MockLlm`] - Scripted oracle for tests
//! - [`RetryConfig`] - Bounded retry of transient failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qolab_model::{LlmGenerator, OpenAIClient, OpenAIConfig};
//! use std::sync::Arc;
//!
//! let api_key = std::env::var("OPENAI_API_KEY").unwrap();
//! let client = OpenAIClient::new(OpenAIConfig::new(api_key, "gpt-4.1-mini")).unwrap();
//! let generator = LlmGenerator::new(Arc::new(client), "gpt-4.1-mini");
//! ```

pub mod dryrun;
pub mod generation;
pub mod mock;
pub mod openai;
pub mod retry;

pub use dryrun::{DryRunGenerator, generate_dry_run};
pub use generation::{GENERATION_MAX_TOKENS, GenerationRequest, Generator, LlmGenerator};
pub use mock::MockLlm;
pub use openai::{OpenAIClient, OpenAIConfig};
pub use retry::RetryConfig;
