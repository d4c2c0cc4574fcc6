//! Chat repository trait.

use super::model::Chat;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Everything the chat store persists, written as one unit so the list and
/// the current selection can never disagree on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDocument {
    pub chats: Vec<Chat>,
    pub current_chat_id: Option<String>,
}

/// Persistence for the chat document.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Loads the stored document.
    ///
    /// Returns `Ok(None)` when nothing is stored or the stored value is
    /// unreadable.
    async fn load(&self) -> Result<Option<ChatDocument>>;

    /// Replaces the stored document.
    async fn save(&self, document: &ChatDocument) -> Result<()>;
}
