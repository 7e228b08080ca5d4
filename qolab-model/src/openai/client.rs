//! Chat-completions client over reqwest.

use super::config::OpenAIConfig;
use super::convert::{self, ChatCompletionResponse};
use crate::retry::{
    RetryConfig, execute_with_retry, is_retryable_model_error, is_retryable_status_code,
};
use async_trait::async_trait;
use qolab_core::{Llm, LlmRequest, LlmResponse, QolabError, Result};
use reqwest::Client;

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use qolab_model::openai::{OpenAIClient, OpenAIConfig};
///
/// let client = OpenAIClient::new(OpenAIConfig::new(api_key, "gpt-4.1-mini"))?;
/// ```
pub struct OpenAIClient {
    client: Client,
    config: OpenAIConfig,
    retry_config: RetryConfig,
}

impl OpenAIClient {
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QolabError::Model(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            retry_config: RetryConfig::default(),
        })
    }

    #[must_use]
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    async fn send_once(&self, url: &str, body: &convert::ChatCompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| QolabError::Model(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| {
                QolabError::Model(format!("OpenAI API request failed reading body: {e}"))
            })?;

        if !status.is_success() {
            let retryability = if is_retryable_status_code(status.as_u16()) {
                "retryable"
            } else {
                "non-retryable"
            };
            return Err(QolabError::Model(format!(
                "OpenAI API error ({status}, {retryability}): {text}"
            )));
        }
        Ok(text)
    }
}

#[async_trait]
impl Llm for OpenAIClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn generate_content(&self, request: LlmRequest) -> Result<LlmResponse> {
        let url = self.config.completions_url();
        let body = convert::to_request(&request, &self.config.model, self.config.max_tokens);

        tracing::debug!(
            model = %body.model,
            messages = body.messages.len(),
            temperature = ?body.temperature,
            max_tokens = ?body.max_tokens,
            "Sending chat completion request"
        );

        let response_text = execute_with_retry(&self.retry_config, is_retryable_model_error, || {
            self.send_once(&url, &body)
        })
        .await?;

        let chat_response: ChatCompletionResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                QolabError::Model(format!("Failed to parse response: {e} - {response_text}"))
            })?;

        Ok(convert::from_response(&chat_response))
    }
}
