//! Configuration for the chat-completions client.

use std::time::Duration;

/// Default OpenAI API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default model for both generation and judging.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// Model used when a request leaves its model name empty.
    pub model: String,
    /// Custom base URL, e.g. a proxy or a self-hosted gateway.
    pub base_url: Option<String>,
    /// Fallback output limit for requests that do not set one.
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            max_tokens: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPENAI_API_BASE)
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        let base_url = self.effective_base_url().trim_end_matches('/');
        format!("{base_url}/chat/completions")
    }
}
