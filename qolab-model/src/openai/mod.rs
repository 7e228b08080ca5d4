//! OpenAI-compatible chat-completions provider.
//!
//! Works against the OpenAI API and any gateway that speaks the same
//! `/chat/completions` protocol (set `base_url`).

mod client;
mod config;
pub mod convert;

pub use client::OpenAIClient;
pub use config::{DEFAULT_MODEL, DEFAULT_TIMEOUT, OPENAI_API_BASE, OpenAIConfig};
