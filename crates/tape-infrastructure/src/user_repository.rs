//! Auth repositories backed by local storage.

use async_trait::async_trait;
use std::sync::Arc;
use version_migrate::Migrator;

use tape_core::auth::{AuthSessionRepository, SessionUser, UserDirectory, UserDirectoryRepository};
use tape_core::storage::{LocalStorage, keys};
use tape_core::{Result, TapeError};

use crate::dto::create_user_directory_migrator;

/// Account directory under the `tape-users` key.
pub struct LocalStorageUserRepository {
    storage: Arc<dyn LocalStorage>,
    migrator: Migrator,
}

impl LocalStorageUserRepository {
    const ENTITY: &'static str = "user_directory";

    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            storage,
            migrator: create_user_directory_migrator(),
        }
    }

    fn decode(&self, content: &str) -> Result<UserDirectory> {
        let json_value: serde_json::Value = serde_json::from_str(content)?;
        Ok(self.migrator.load_flat_from(Self::ENTITY, json_value)?)
    }
}

#[async_trait]
impl UserDirectoryRepository for LocalStorageUserRepository {
    async fn load(&self) -> Result<UserDirectory> {
        let Some(content) = self.storage.get_item(keys::USERS).await? else {
            return Ok(UserDirectory::default());
        };

        Ok(self.decode(&content).unwrap_or_else(|e| {
            tracing::error!("Stored users are unreadable, ignoring them: {}", e);
            UserDirectory::default()
        }))
    }

    async fn save(&self, directory: &UserDirectory) -> Result<()> {
        let serialized = self
            .migrator
            .save_domain_flat(Self::ENTITY, directory.clone())
            .map_err(|e| TapeError::storage(format!("Failed to serialize users: {}", e)))?;
        self.storage.set_item(keys::USERS, &serialized).await
    }
}

/// Signed-in user under the `tape-session` key.
pub struct LocalStorageSessionRepository {
    storage: Arc<dyn LocalStorage>,
}

impl LocalStorageSessionRepository {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl AuthSessionRepository for LocalStorageSessionRepository {
    async fn load(&self) -> Result<Option<SessionUser>> {
        let Some(content) = self.storage.get_item(keys::SESSION).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&content) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::error!("Stored session is unreadable, ignoring it: {}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, user: &SessionUser) -> Result<()> {
        let serialized = serde_json::to_string(user)?;
        self.storage.set_item(keys::SESSION, &serialized).await
    }

    async fn clear(&self) -> Result<()> {
        self.storage.remove_item(keys::SESSION).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryLocalStorage;
    use tape_core::auth::User;

    #[tokio::test]
    async fn test_directory_round_trip() {
        let storage = Arc::new(MemoryLocalStorage::new());
        let repo = LocalStorageUserRepository::new(storage);

        let directory: UserDirectory = [User::new("Ada", "ada@example.com", "pw")]
            .into_iter()
            .collect();
        repo.save(&directory).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), directory);
    }

    #[tokio::test]
    async fn test_corrupt_directory_is_empty() {
        let storage = Arc::new(MemoryLocalStorage::new());
        storage.set_item(keys::USERS, "[1, 2").await.unwrap();

        let repo = LocalStorageUserRepository::new(storage);
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_save_load_clear() {
        let storage = Arc::new(MemoryLocalStorage::new());
        let repo = LocalStorageSessionRepository::new(storage.clone());
        let user = SessionUser::from(&User::new("Ada", "ada@example.com", "pw"));

        repo.save(&user).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(user));

        let raw = storage.get_item(keys::SESSION).await.unwrap().unwrap();
        assert!(!raw.contains("password"));

        repo.clear().await.unwrap();
        assert_eq!(repo.load().await.unwrap(), None);
    }
}
