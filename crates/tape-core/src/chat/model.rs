//! Chat domain model.

use super::message::{ChatMessage, MessageRole};
use crate::generation::ObjectDescriptor;
use serde::{Deserialize, Serialize};

/// Name given to freshly created chats.
pub const DEFAULT_CHAT_NAME: &str = "New Chat";
/// Name used when a rename is given only whitespace.
pub const UNTITLED_CHAT_NAME: &str = "Untitled Chat";
/// Length (in characters) a chat is auto-named to from its first prompt.
pub const AUTO_NAME_LENGTH: usize = 30;

/// A chat session: an ordered, append-only list of messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub created_at: String,
    pub last_modified: String,
}

impl Chat {
    /// Creates an empty chat with a fresh id and the default name.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: DEFAULT_CHAT_NAME.to_string(),
            messages: Vec::new(),
            created_at: now.clone(),
            last_modified: now,
        }
    }

    pub fn has_default_name(&self) -> bool {
        self.name == DEFAULT_CHAT_NAME
    }

    /// Appends a message, auto-naming the chat from the first user prompt.
    pub fn push(&mut self, message: ChatMessage) {
        if self.has_default_name() && message.role == MessageRole::User {
            self.name = auto_name(&message.content);
        }
        self.last_modified = message.timestamp.clone();
        self.messages.push(message);
    }

    /// The object to replay when this chat is shown: present only when the
    /// most recent message is a successful generation.
    pub fn last_object(&self) -> Option<&ObjectDescriptor> {
        self.messages.last().and_then(ChatMessage::generated_object)
    }

    pub(crate) fn touch(&mut self) {
        self.last_modified = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

fn auto_name(content: &str) -> String {
    if content.chars().count() > AUTO_NAME_LENGTH {
        let head: String = content.chars().take(AUTO_NAME_LENGTH).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_user_message_names_chat() {
        let mut chat = Chat::new();
        chat.push(ChatMessage::new(MessageRole::User, "red cube"));
        assert_eq!(chat.name, "red cube");

        chat.push(ChatMessage::new(MessageRole::User, "blue sphere"));
        assert_eq!(chat.name, "red cube");
    }

    #[test]
    fn test_auto_name_truncates_long_prompts() {
        let mut chat = Chat::new();
        let prompt = "a very large shiny golden spinning donut floating";
        chat.push(ChatMessage::new(MessageRole::User, prompt));
        assert_eq!(chat.name, "a very large shiny golden spin...");
        assert_eq!(chat.name.chars().count(), AUTO_NAME_LENGTH + 3);
    }

    #[test]
    fn test_assistant_message_does_not_rename() {
        let mut chat = Chat::new();
        chat.push(ChatMessage::new(MessageRole::Assistant, "hello"));
        assert!(chat.has_default_name());
    }

    #[test]
    fn test_last_object_requires_latest_message() {
        let mut chat = Chat::new();
        let object = crate::generation::synthesize(&crate::generation::classify("cube"));
        chat.push(ChatMessage::generated("cube", object.clone()));
        assert_eq!(chat.last_object(), Some(&object));

        chat.push(ChatMessage::failed("sphere", "broken"));
        assert_eq!(chat.last_object(), None);
    }
}
