//! Versioned persistence DTOs.

pub mod chat;
pub mod user;

pub use chat::{ChatDocumentV1_0_0, create_chat_document_migrator};
pub use user::{UserDirectoryV1_0_0, create_user_directory_migrator};
