//! Wire types for the chat-completions API and their conversion to core types.

use qolab_core::{Content, FinishReason, LlmRequest, LlmResponse, UsageMetadata};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Maps a core role onto the chat-completions role vocabulary.
pub fn content_to_message(content: &Content) -> Message {
    let role = match content.role.as_str() {
        "model" | "assistant" => "assistant",
        "system" | "developer" => "system",
        _ => "user",
    };
    Message {
        role: role.to_string(),
        content: Some(content.text.clone()),
    }
}

/// Builds the request body, falling back to the configured model and token limit.
pub fn to_request(
    request: &LlmRequest,
    default_model: &str,
    default_max_tokens: Option<u32>,
) -> ChatCompletionRequest {
    let model = if request.model.is_empty() {
        default_model
    } else {
        request.model.as_str()
    };
    ChatCompletionRequest {
        model: model.to_string(),
        messages: request.contents.iter().map(content_to_message).collect(),
        temperature: request.temperature(),
        max_tokens: request.max_output_tokens().or(default_max_tokens),
    }
}

/// Takes the first choice's message text. Missing content becomes `None`.
pub fn from_response(response: &ChatCompletionResponse) -> LlmResponse {
    let choice = response.choices.first();
    let text = choice
        .and_then(|c| c.message.as_ref())
        .and_then(|m| m.content.clone());
    let finish_reason = choice
        .and_then(|c| c.finish_reason.as_deref())
        .map(FinishReason::from_openai);
    let usage_metadata = response.usage.as_ref().map(|u| UsageMetadata {
        prompt_token_count: u.prompt_tokens,
        candidates_token_count: u.completion_tokens,
        total_token_count: u.total_tokens,
    });

    LlmResponse {
        text,
        usage_metadata,
        finish_reason,
    }
}
