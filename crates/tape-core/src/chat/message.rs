//! Chat message types.

use crate::generation::ObjectDescriptor;
use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// A single entry in a chat. Immutable once appended.
///
/// A generation request is recorded as a user message carrying either the
/// synthesized object or the error that replaced it, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub role: MessageRole,
    pub content: String,
    #[serde(rename = "objectCode", default, skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

impl ChatMessage {
    /// Creates a plain message without a generation result.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            object: None,
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// A user prompt whose object was generated successfully.
    pub fn generated(prompt: impl Into<String>, object: ObjectDescriptor) -> Self {
        Self {
            object: Some(object),
            ..Self::new(MessageRole::User, prompt)
        }
    }

    /// A user prompt whose object could not be shown.
    pub fn failed(prompt: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(MessageRole::User, prompt)
        }
    }

    /// Returns the object if this is a successful user generation.
    pub fn generated_object(&self) -> Option<&ObjectDescriptor> {
        match self.role {
            MessageRole::User => self.object.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{classify, synthesize};

    #[test]
    fn test_generated_message_json_shape() {
        let message = ChatMessage::generated("red cube", synthesize(&classify("red cube")));
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["type"], "user");
        assert_eq!(json["content"], "red cube");
        assert!(json.get("objectCode").is_some());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failed_message_has_no_object() {
        let message = ChatMessage::failed("red cube", "boom");
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["error"], "boom");
        assert!(json.get("objectCode").is_none());
        assert!(message.generated_object().is_none());
    }
}
