//! Infrastructure layer: local storage backends, versioned DTOs, repository
//! implementations, configuration loading and dataset export.

pub mod chat_repository;
pub mod config_service;
pub mod dto;
pub mod paths;
pub mod preferences_repository;
pub mod storage;
pub mod training_export;
pub mod user_repository;

pub use crate::chat_repository::LocalStorageChatRepository;
pub use crate::config_service::ConfigService;
pub use crate::preferences_repository::LocalStoragePreferencesRepository;
pub use crate::storage::{FileLocalStorage, MemoryLocalStorage};
pub use crate::user_repository::{LocalStorageSessionRepository, LocalStorageUserRepository};
