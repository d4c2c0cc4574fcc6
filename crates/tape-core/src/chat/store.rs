//! Chat store: the ordered chat list plus the current selection.

use super::message::ChatMessage;
use super::model::{Chat, UNTITLED_CHAT_NAME};
use super::repository::{ChatDocument, ChatRepository};
use crate::error::{Result, TapeError};
use std::sync::Arc;
use tokio::sync::watch;

/// Sidebar view of one chat.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSummary {
    pub id: String,
    pub name: String,
    pub message_count: usize,
    pub last_modified: String,
}

/// Published after every mutation of the chat store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatListSnapshot {
    pub chats: Vec<ChatSummary>,
    pub current_id: String,
}

/// What deleting a chat did to the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A chat other than the current one was removed.
    Removed,
    /// The current chat was removed and the new head became current.
    SwitchedTo(String),
    /// The last chat was removed and a fresh one was created.
    Recreated(String),
}

/// Single writer over the chat list.
///
/// Never empty once loaded; exactly one chat is current. Every mutation is
/// staged on a copy, persisted through the repository, and only then adopted
/// and published to subscribers. A failed save leaves the store unchanged.
pub struct ChatStore {
    repository: Arc<dyn ChatRepository>,
    chats: Vec<Chat>,
    current_id: String,
    snapshot_tx: watch::Sender<ChatListSnapshot>,
}

impl ChatStore {
    /// Loads the stored chats, repairing an empty list or a dangling
    /// current id.
    ///
    /// Never fails: unreadable storage starts fresh, and a repair that cannot
    /// be saved is kept in memory until the next successful mutation.
    pub async fn load(repository: Arc<dyn ChatRepository>) -> Self {
        let document = match repository.load().await {
            Ok(document) => document.unwrap_or_default(),
            Err(e) => {
                tracing::error!("Failed to load chats, starting fresh: {}", e);
                ChatDocument::default()
            }
        };

        let mut chats = document.chats;
        let mut repaired = false;
        if chats.is_empty() {
            tracing::info!("No stored chats, creating a new one");
            chats.push(Chat::new());
            repaired = true;
        }

        let current_id = match document
            .current_chat_id
            .filter(|id| chats.iter().any(|chat| &chat.id == id))
        {
            Some(id) => id,
            None => {
                repaired = true;
                chats[0].id.clone()
            }
        };

        let (snapshot_tx, _) = watch::channel(ChatListSnapshot::default());
        let store = Self {
            repository,
            chats,
            current_id,
            snapshot_tx,
        };

        if repaired {
            let document = store.document();
            if let Err(e) = store.repository.save(&document).await {
                tracing::error!("Failed to save repaired chats, continuing in memory: {}", e);
            }
        }
        store.publish();
        store
    }

    /// Creates a new chat at the head of the list and makes it current.
    pub async fn create(&mut self) -> Result<String> {
        let chat = Chat::new();
        let id = chat.id.clone();
        tracing::debug!(chat_id = %id, "Creating chat");

        let mut chats = Vec::with_capacity(self.chats.len() + 1);
        chats.push(chat);
        chats.extend(self.chats.iter().cloned());
        self.commit(chats, id.clone()).await?;
        Ok(id)
    }

    pub async fn switch_to(&mut self, id: &str) -> Result<()> {
        self.index_of(id)?;
        self.commit(self.chats.clone(), id.to_string()).await
    }

    /// Renames a chat. Surrounding whitespace is trimmed; an empty name
    /// becomes the placeholder.
    pub async fn rename(&mut self, id: &str, name: &str) -> Result<()> {
        let index = self.index_of(id)?;
        let trimmed = name.trim();
        let mut chats = self.chats.clone();
        let chat = &mut chats[index];
        chat.name = if trimmed.is_empty() {
            UNTITLED_CHAT_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        chat.touch();
        self.commit(chats, self.current_id.clone()).await
    }

    pub async fn delete(&mut self, id: &str) -> Result<DeleteOutcome> {
        let index = self.index_of(id)?;
        let mut chats = self.chats.clone();
        chats.remove(index);

        let (outcome, current_id) = if self.current_id != id {
            (DeleteOutcome::Removed, self.current_id.clone())
        } else if let Some(head) = chats.first() {
            (DeleteOutcome::SwitchedTo(head.id.clone()), head.id.clone())
        } else {
            let chat = Chat::new();
            let current_id = chat.id.clone();
            chats.push(chat);
            (DeleteOutcome::Recreated(current_id.clone()), current_id)
        };

        self.commit(chats, current_id).await?;
        tracing::debug!(chat_id = %id, ?outcome, "Deleted chat");
        Ok(outcome)
    }

    /// Appends a message to the current chat.
    pub async fn append_message(&mut self, message: ChatMessage) -> Result<()> {
        let index = self.index_of(&self.current_id)?;
        let mut chats = self.chats.clone();
        chats[index].push(message);
        self.commit(chats, self.current_id.clone()).await
    }

    pub fn current(&self) -> &Chat {
        self.chats
            .iter()
            .find(|chat| chat.id == self.current_id)
            .unwrap_or(&self.chats[0])
    }

    pub fn current_id(&self) -> &str {
        &self.current_id
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn get(&self, id: &str) -> Option<&Chat> {
        self.chats.iter().find(|chat| chat.id == id)
    }

    /// Subscribes to chat list snapshots. The receiver starts with the
    /// latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ChatListSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> ChatListSnapshot {
        ChatListSnapshot {
            chats: self
                .chats
                .iter()
                .map(|chat| ChatSummary {
                    id: chat.id.clone(),
                    name: chat.name.clone(),
                    message_count: chat.messages.len(),
                    last_modified: chat.last_modified.clone(),
                })
                .collect(),
            current_id: self.current_id.clone(),
        }
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.chats
            .iter()
            .position(|chat| chat.id == id)
            .ok_or_else(|| TapeError::not_found("chat", id))
    }

    fn document(&self) -> ChatDocument {
        ChatDocument {
            chats: self.chats.clone(),
            current_chat_id: Some(self.current_id.clone()),
        }
    }

    /// Saves the staged state and adopts it only once the save succeeded.
    async fn commit(&mut self, chats: Vec<Chat>, current_id: String) -> Result<()> {
        let document = ChatDocument {
            chats,
            current_chat_id: Some(current_id.clone()),
        };
        self.repository.save(&document).await?;

        self.chats = document.chats;
        self.current_id = current_id;
        self.publish();
        Ok(())
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MessageRole;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MockChatRepository {
        document: Mutex<Option<ChatDocument>>,
        fail_saves: AtomicBool,
    }

    impl MockChatRepository {
        fn with(document: ChatDocument) -> Self {
            Self {
                document: Mutex::new(Some(document)),
                fail_saves: AtomicBool::new(false),
            }
        }

        fn failing() -> Self {
            Self {
                fail_saves: AtomicBool::new(true),
                ..Self::default()
            }
        }

        fn set_fail_saves(&self, fail: bool) {
            self.fail_saves.store(fail, Ordering::SeqCst);
        }

        async fn stored(&self) -> ChatDocument {
            self.document.lock().await.clone().unwrap()
        }
    }

    #[async_trait]
    impl ChatRepository for MockChatRepository {
        async fn load(&self) -> Result<Option<ChatDocument>> {
            Ok(self.document.lock().await.clone())
        }

        async fn save(&self, document: &ChatDocument) -> Result<()> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(TapeError::storage("disk full"));
            }
            *self.document.lock().await = Some(document.clone());
            Ok(())
        }
    }

    async fn empty_store() -> (ChatStore, Arc<MockChatRepository>) {
        let repo = Arc::new(MockChatRepository::default());
        let store = ChatStore::load(repo.clone()).await;
        (store, repo)
    }

    #[tokio::test]
    async fn test_load_empty_creates_chat() {
        let (store, repo) = empty_store().await;
        assert_eq!(store.chats().len(), 1);
        assert_eq!(store.current().id, store.chats()[0].id);

        let stored = repo.stored().await;
        assert_eq!(stored.chats.len(), 1);
        assert_eq!(stored.current_chat_id.as_deref(), Some(store.current_id()));
    }

    #[tokio::test]
    async fn test_load_repairs_dangling_current_id() {
        let chats = vec![Chat::new(), Chat::new()];
        let first = chats[0].id.clone();
        let repo = Arc::new(MockChatRepository::with(ChatDocument {
            chats,
            current_chat_id: Some("gone".to_string()),
        }));

        let store = ChatStore::load(repo).await;
        assert_eq!(store.current_id(), first);
    }

    #[tokio::test]
    async fn test_create_prepends_and_selects() {
        let (mut store, _) = empty_store().await;
        let original = store.current_id().to_string();

        let id = store.create().await.unwrap();
        assert_eq!(store.chats()[0].id, id);
        assert_eq!(store.chats()[1].id, original);
        assert_eq!(store.current_id(), id);
    }

    #[tokio::test]
    async fn test_deleting_only_chat_recreates_one() {
        let (mut store, repo) = empty_store().await;
        let id = store.current_id().to_string();

        let outcome = store.delete(&id).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Recreated(_)));
        assert_eq!(store.chats().len(), 1);
        assert_ne!(store.current_id(), id);
        assert_eq!(repo.stored().await.chats.len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_current_switches_to_head() {
        let (mut store, _) = empty_store().await;
        let older = store.current_id().to_string();
        let newer = store.create().await.unwrap();

        let outcome = store.delete(&newer).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::SwitchedTo(older.clone()));
        assert_eq!(store.current_id(), older);
    }

    #[tokio::test]
    async fn test_deleting_other_chat_keeps_selection() {
        let (mut store, _) = empty_store().await;
        let older = store.current_id().to_string();
        let newer = store.create().await.unwrap();

        let outcome = store.delete(&older).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Removed);
        assert_eq!(store.current_id(), newer);
    }

    #[tokio::test]
    async fn test_rename_trims_and_uses_placeholder() {
        let (mut store, _) = empty_store().await;
        let id = store.current_id().to_string();

        store.rename(&id, "  Robots  ").await.unwrap();
        assert_eq!(store.current().name, "Robots");

        store.rename(&id, "   ").await.unwrap();
        assert_eq!(store.current().name, UNTITLED_CHAT_NAME);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (mut store, _) = empty_store().await;
        assert!(store.switch_to("missing").await.unwrap_err().is_not_found());
        assert!(store.rename("missing", "x").await.unwrap_err().is_not_found());
        assert!(store.delete("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_append_message_persists_and_publishes() {
        let (mut store, repo) = empty_store().await;
        let mut rx = store.subscribe();

        store
            .append_message(ChatMessage::new(MessageRole::User, "red cube"))
            .await
            .unwrap();

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.chats[0].name, "red cube");
        assert_eq!(snapshot.chats[0].message_count, 1);

        let stored = repo.stored().await;
        assert_eq!(stored.chats[0].messages.len(), 1);
    }

    #[tokio::test]
    async fn test_switch_changes_current() {
        let (mut store, repo) = empty_store().await;
        let older = store.current_id().to_string();
        store.create().await.unwrap();

        store.switch_to(&older).await.unwrap();
        assert_eq!(store.current_id(), older);
        assert_eq!(repo.stored().await.current_chat_id, Some(older));
    }

    #[tokio::test]
    async fn test_failed_save_leaves_store_unchanged() {
        let (mut store, repo) = empty_store().await;
        let id = store.current_id().to_string();
        let mut rx = store.subscribe();
        let before = store.snapshot();
        repo.set_fail_saves(true);

        assert!(store.create().await.is_err());
        assert!(store.rename(&id, "Robots").await.is_err());
        assert!(store.delete(&id).await.is_err());
        assert!(
            store
                .append_message(ChatMessage::new(MessageRole::User, "red cube"))
                .await
                .is_err()
        );

        assert_eq!(store.snapshot(), before);
        assert_eq!(store.current_id(), id);
        assert_eq!(*rx.borrow_and_update(), before);
        assert_eq!(repo.stored().await.chats.len(), 1);
        assert!(repo.stored().await.chats[0].messages.is_empty());
    }

    #[tokio::test]
    async fn test_store_recovers_after_save_failure() {
        let (mut store, repo) = empty_store().await;
        repo.set_fail_saves(true);
        assert!(store.create().await.is_err());

        repo.set_fail_saves(false);
        let id = store.create().await.unwrap();
        assert_eq!(store.chats().len(), 2);
        assert_eq!(repo.stored().await.current_chat_id, Some(id));
    }

    #[tokio::test]
    async fn test_load_keeps_repaired_store_when_save_fails() {
        let repo = Arc::new(MockChatRepository::failing());
        let store = ChatStore::load(repo.clone()).await;

        assert_eq!(store.chats().len(), 1);
        assert_eq!(store.current_id(), store.chats()[0].id);
        assert_eq!(store.subscribe().borrow().chats.len(), 1);
        assert!(repo.document.lock().await.is_none());
    }
}
