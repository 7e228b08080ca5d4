use serde::{Deserialize, Serialize};

/// A single chat message exchanged with a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub text: String,
}

impl Content {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new("system", text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new("user", text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new("assistant", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_roles() {
        assert_eq!(Content::system("s").role, "system");
        assert_eq!(Content::user("u").role, "user");
        assert_eq!(Content::assistant("a").role, "assistant");
    }

    #[test]
    fn test_content_serde() {
        let content = Content::user("hello");
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "text": "hello"}));
    }
}
