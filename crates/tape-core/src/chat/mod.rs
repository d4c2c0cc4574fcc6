//! Chat domain module.
//!
//! # Module Structure
//!
//! - `model`: The chat aggregate (`Chat`) and naming rules
//! - `message`: Message types (`MessageRole`, `ChatMessage`)
//! - `repository`: Persisted document and repository trait
//! - `store`: `ChatStore`, the single writer over the chat list

mod message;
mod model;
mod repository;
mod store;

pub use message::{ChatMessage, MessageRole};
pub use model::{AUTO_NAME_LENGTH, Chat, DEFAULT_CHAT_NAME, UNTITLED_CHAT_NAME};
pub use repository::{ChatDocument, ChatRepository};
pub use store::{ChatListSnapshot, ChatStore, ChatSummary, DeleteOutcome};
