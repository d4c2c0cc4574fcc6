//! Chat document DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Chats with messages plus the current chat id in one document

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use tape_core::chat::{Chat, ChatDocument, ChatMessage, MessageRole};
use tape_core::generation::ObjectDescriptor;

// ============================================================================
// ChatMessage DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageV1_0_0 {
    #[serde(rename = "type")]
    pub role: MessageRole,
    pub content: String,
    #[serde(rename = "objectCode", default, skip_serializing_if = "Option::is_none")]
    pub object_code: Option<ObjectDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl From<&ChatMessage> for ChatMessageV1_0_0 {
    fn from(message: &ChatMessage) -> Self {
        ChatMessageV1_0_0 {
            role: message.role,
            content: message.content.clone(),
            object_code: message.object.clone(),
            error: message.error.clone(),
            timestamp: message.timestamp.clone(),
        }
    }
}

impl From<ChatMessageV1_0_0> for ChatMessage {
    fn from(dto: ChatMessageV1_0_0) -> Self {
        ChatMessage {
            role: dto.role,
            content: dto.content,
            object: dto.object_code,
            error: dto.error,
            timestamp: dto.timestamp,
        }
    }
}

// ============================================================================
// Chat DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatV1_0_0 {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub messages: Vec<ChatMessageV1_0_0>,
    pub created_at: String,
    pub last_modified: String,
}

impl From<&Chat> for ChatV1_0_0 {
    fn from(chat: &Chat) -> Self {
        ChatV1_0_0 {
            id: chat.id.clone(),
            name: chat.name.clone(),
            messages: chat.messages.iter().map(Into::into).collect(),
            created_at: chat.created_at.clone(),
            last_modified: chat.last_modified.clone(),
        }
    }
}

impl From<ChatV1_0_0> for Chat {
    fn from(dto: ChatV1_0_0) -> Self {
        Chat {
            id: dto.id,
            name: dto.name,
            messages: dto.messages.into_iter().map(Into::into).collect(),
            created_at: dto.created_at,
            last_modified: dto.last_modified,
        }
    }
}

// ============================================================================
// ChatDocument DTOs
// ============================================================================

/// Chat document DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct ChatDocumentV1_0_0 {
    #[serde(default)]
    pub chats: Vec<ChatV1_0_0>,
    #[serde(default)]
    pub current_chat_id: Option<String>,
}

impl IntoDomain<ChatDocument> for ChatDocumentV1_0_0 {
    fn into_domain(self) -> ChatDocument {
        ChatDocument {
            chats: self.chats.into_iter().map(Into::into).collect(),
            current_chat_id: self.current_chat_id,
        }
    }
}

impl FromDomain<ChatDocument> for ChatDocumentV1_0_0 {
    fn from_domain(document: ChatDocument) -> Self {
        ChatDocumentV1_0_0 {
            chats: document.chats.iter().map(Into::into).collect(),
            current_chat_id: document.current_chat_id,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for the chat document.
pub fn create_chat_document_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("chat_document" => [
        ChatDocumentV1_0_0,
        ChatDocument
    ], save = true)
    .expect("Failed to create chat_document migrator")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tape_core::generation::{classify, synthesize};

    #[test]
    fn test_migrator_round_trips_document() {
        let migrator = create_chat_document_migrator();

        let mut chat = Chat::new();
        chat.push(ChatMessage::generated("red cube", synthesize(&classify("red cube"))));
        chat.push(ChatMessage::failed("sphere", "broken"));
        let document = ChatDocument {
            current_chat_id: Some(chat.id.clone()),
            chats: vec![chat],
        };

        let text = migrator
            .save_domain_flat("chat_document", document.clone())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["chats"][0]["messages"][0]["type"], "user");

        let loaded: ChatDocument = migrator.load_flat_from("chat_document", value).unwrap();
        assert_eq!(loaded, document);
    }
}
