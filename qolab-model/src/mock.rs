use async_trait::async_trait;
use qolab_core::{Llm, LlmRequest, LlmResponse, QolabError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

/// Scripted [`Llm`] for tests.
///
/// Replies are served in order; the last one repeats once the queue is down to it.
/// Every request is recorded.
pub struct MockLlm {
    name: String,
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A mock whose every call fails with a model error.
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name).with_error(message)
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(MockReply::Text(text.into()))
    }

    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.push(MockReply::Error(message.into()))
    }

    fn push(self, reply: MockReply) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn next_reply(&self) -> Option<MockReply> {
        let mut replies = self.replies.lock().ok()?;
        if replies.len() > 1 { replies.pop_front() } else { replies.front().cloned() }
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_content(&self, req: LlmRequest) -> Result<LlmResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(req);
        }
        match self.next_reply() {
            Some(MockReply::Text(text)) => Ok(LlmResponse::new(text)),
            Some(MockReply::Error(message)) => Err(QolabError::Model(message)),
            None => Err(QolabError::Model(format!("{}: no scripted reply", self.name))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qolab_core::Content;

    fn request(text: &str) -> LlmRequest {
        LlmRequest::new("test", vec![Content::user(text)])
    }

    #[tokio::test]
    async fn replies_in_order_then_repeats_last() {
        let mock = MockLlm::new("test").with_text("first").with_text("second");

        let a = mock.generate_content(request("1")).await.unwrap();
        let b = mock.generate_content(request("2")).await.unwrap();
        let c = mock.generate_content(request("3")).await.unwrap();

        assert_eq!(a.text_or_empty(), "first");
        assert_eq!(b.text_or_empty(), "second");
        assert_eq!(c.text_or_empty(), "second");
        assert_eq!(mock.requests().len(), 3);
        assert_eq!(mock.requests()[2].contents[0].text, "3");
    }

    #[tokio::test]
    async fn error_replies_surface_as_model_errors() {
        let mock = MockLlm::failing("test", "connection refused");
        let err = mock.generate_content(request("x")).await.unwrap_err();
        assert!(matches!(err, QolabError::Model(ref m) if m == "connection refused"));
    }

    #[tokio::test]
    async fn unscripted_mock_errors() {
        let mock = MockLlm::new("empty");
        assert!(mock.generate_content(request("x")).await.is_err());
        assert_eq!(mock.name(), "empty");
    }
}
