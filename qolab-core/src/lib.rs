//! # qolab-core
//!
//! Core traits and configuration types shared by the Qolab crates.
//!
//! ## Overview
//!
//! - [`Llm`] - The oracle trait used for both generation and judging
//! - [`CaseConfig`] / [`Constraints`] - The writing task and its checkable limits
//! - [`PromptSuite`] / [`PromptVariant`] - Prompt strategies evaluated against a case
//! - [`JudgeRubric`] - Instructions handed to the judge
//! - [`QolabError`] / [`Result`] - Unified error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qolab_core::{CaseConfig, PromptSuite};
//!
//! let case = CaseConfig::load("configs/cases/linkedin_b2b_saas.json")?;
//! let suite = PromptSuite::load("configs/suites/default.json")?;
//! for variant in &suite.variants {
//!     println!("{}", variant.render_user_prompt(&case));
//! }
//! # Ok::<(), qolab_core::QolabError>(())
//! ```

pub mod case;
pub mod error;
pub mod model;
pub mod rubric;
pub mod types;

pub use case::{CaseConfig, Constraints, PromptSuite, PromptVariant, load_keywords};
pub use error::{QolabError, Result};
pub use model::{FinishReason, GenerateContentConfig, Llm, LlmRequest, LlmResponse, UsageMetadata};
pub use rubric::JudgeRubric;
pub use types::Content;
