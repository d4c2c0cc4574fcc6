//! Chat repository backed by local storage.
//!
//! The whole chat document lives under the `tape-chats` key as versioned
//! JSON, so the chat list and current chat id are always written together.

use async_trait::async_trait;
use std::sync::Arc;
use version_migrate::Migrator;

use tape_core::chat::{ChatDocument, ChatRepository};
use tape_core::storage::{LocalStorage, keys};
use tape_core::{Result, TapeError};

use crate::dto::create_chat_document_migrator;

pub struct LocalStorageChatRepository {
    storage: Arc<dyn LocalStorage>,
    migrator: Migrator,
}

impl LocalStorageChatRepository {
    const ENTITY: &'static str = "chat_document";

    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            storage,
            migrator: create_chat_document_migrator(),
        }
    }

    fn decode(&self, content: &str) -> Result<ChatDocument> {
        let json_value: serde_json::Value = serde_json::from_str(content)?;
        Ok(self.migrator.load_flat_from(Self::ENTITY, json_value)?)
    }
}

#[async_trait]
impl ChatRepository for LocalStorageChatRepository {
    async fn load(&self) -> Result<Option<ChatDocument>> {
        let Some(content) = self.storage.get_item(keys::CHATS).await? else {
            return Ok(None);
        };

        match self.decode(&content) {
            Ok(document) => {
                tracing::debug!(chats = document.chats.len(), "Loaded chat document");
                Ok(Some(document))
            }
            Err(e) => {
                tracing::error!("Stored chats are unreadable, ignoring them: {}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, document: &ChatDocument) -> Result<()> {
        let serialized = self
            .migrator
            .save_domain_flat(Self::ENTITY, document.clone())
            .map_err(|e| TapeError::storage(format!("Failed to serialize chats: {}", e)))?;

        self.storage.set_item(keys::CHATS, &serialized).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileLocalStorage, MemoryLocalStorage};
    use tape_core::chat::{Chat, ChatMessage, MessageRole};
    use tempfile::TempDir;

    fn document() -> ChatDocument {
        let mut chat = Chat::new();
        chat.push(ChatMessage::new(MessageRole::User, "hello"));
        ChatDocument {
            current_chat_id: Some(chat.id.clone()),
            chats: vec![chat, Chat::new()],
        }
    }

    #[tokio::test]
    async fn test_load_returns_none_when_empty() {
        let repo = LocalStorageChatRepository::new(Arc::new(MemoryLocalStorage::new()));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(FileLocalStorage::with_dir(temp_dir.path().to_path_buf()));
        let repo = LocalStorageChatRepository::new(storage.clone());

        let document = document();
        repo.save(&document).await.unwrap();

        let reopened = LocalStorageChatRepository::new(storage);
        assert_eq!(reopened.load().await.unwrap(), Some(document));
    }

    #[tokio::test]
    async fn test_corrupt_document_is_treated_as_missing() {
        let storage = Arc::new(MemoryLocalStorage::new());
        storage.set_item(keys::CHATS, "{not json").await.unwrap();

        let repo = LocalStorageChatRepository::new(storage);
        assert!(repo.load().await.unwrap().is_none());
    }
}
