//! Candidate text generation.

use async_trait::async_trait;
use qolab_core::{Content, GenerateContentConfig, Llm, LlmRequest, Result};
use std::sync::Arc;

/// Output budget for one generated sample.
pub const GENERATION_MAX_TOKENS: u32 = 600;

/// Everything needed to produce one candidate text.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub case_name: String,
    pub variant_name: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f64,
}

/// Produces candidate text for a (case, variant, temperature) triple.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Name recorded in run metadata.
    fn model_name(&self) -> &str;
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// [`Generator`] that forwards to a chat [`Llm`].
pub struct LlmGenerator {
    llm: Arc<dyn Llm>,
    model: String,
    max_tokens: u32,
}

impl LlmGenerator {
    pub fn new(llm: Arc<dyn Llm>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            max_tokens: GENERATION_MAX_TOKENS,
        }
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl Generator for LlmGenerator {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let llm_request = LlmRequest::new(
            self.model.clone(),
            vec![
                Content::system(request.system_prompt.clone()),
                Content::user(request.user_prompt.clone()),
            ],
        )
        .with_config(GenerateContentConfig {
            temperature: Some(request.temperature as f32),
            max_output_tokens: Some(self.max_tokens),
        });

        let response = self.llm.generate_content(llm_request).await?;
        Ok(response.text_or_empty().to_string())
    }
}
