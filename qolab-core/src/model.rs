use crate::{Result, types::Content};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chat-completion oracle. Used both for generating candidate text and for judging it.
///
/// Implementations return the raw response text; callers are responsible for validating it.
#[async_trait]
pub trait Llm: Send + Sync {
    fn name(&self) -> &str;
    async fn generate_content(&self, req: LlmRequest) -> Result<LlmResponse>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub model: String,
    pub contents: Vec<Content>,
    pub config: Option<GenerateContentConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentConfig {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: Option<String>,
    pub usage_metadata: Option<UsageMetadata>,
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub prompt_token_count: u32,
    pub candidates_token_count: u32,
    pub total_token_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Other,
}

impl FinishReason {
    /// Maps an OpenAI-style `finish_reason` string.
    pub fn from_openai(value: &str) -> Self {
        match value {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::MaxTokens,
            "content_filter" => FinishReason::Safety,
            _ => FinishReason::Other,
        }
    }
}

impl LlmRequest {
    pub fn new(model: impl Into<String>, contents: Vec<Content>) -> Self {
        Self {
            model: model.into(),
            contents,
            config: None,
        }
    }

    /// Set the generation config.
    pub fn with_config(mut self, config: GenerateContentConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn temperature(&self) -> Option<f32> {
        self.config.as_ref().and_then(|c| c.temperature)
    }

    pub fn max_output_tokens(&self) -> Option<u32> {
        self.config.as_ref().and_then(|c| c.max_output_tokens)
    }
}

impl LlmResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            usage_metadata: None,
            finish_reason: Some(FinishReason::Stop),
        }
    }

    /// Response text, or the empty string when the provider returned no content.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_request_creation() {
        let req = LlmRequest::new("test-model", vec![]);
        assert_eq!(req.model, "test-model");
        assert!(req.contents.is_empty());
        assert_eq!(req.temperature(), None);
    }

    #[test]
    fn test_llm_request_with_config() {
        let config = GenerateContentConfig {
            temperature: Some(0.0),
            max_output_tokens: Some(400),
        };
        let req = LlmRequest::new("test-model", vec![Content::user("hi")]).with_config(config);

        assert_eq!(req.temperature(), Some(0.0));
        assert_eq!(req.max_output_tokens(), Some(400));
    }

    #[test]
    fn test_llm_response_text_or_empty() {
        assert_eq!(LlmResponse::new("hello").text_or_empty(), "hello");
        assert_eq!(LlmResponse::default().text_or_empty(), "");
    }

    #[test]
    fn test_finish_reason_from_openai() {
        assert_eq!(FinishReason::from_openai("stop"), FinishReason::Stop);
        assert_eq!(FinishReason::from_openai("length"), FinishReason::MaxTokens);
        assert_eq!(
            FinishReason::from_openai("content_filter"),
            FinishReason::Safety
        );
        assert_eq!(FinishReason::from_openai("tool_calls"), FinishReason::Other);
    }
}
