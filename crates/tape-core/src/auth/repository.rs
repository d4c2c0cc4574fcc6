//! Auth repository traits.

use super::model::{SessionUser, UserDirectory};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for the account directory.
#[async_trait]
pub trait UserDirectoryRepository: Send + Sync {
    /// Loads the directory; empty when nothing (readable) is stored.
    async fn load(&self) -> Result<UserDirectory>;

    async fn save(&self, directory: &UserDirectory) -> Result<()>;
}

/// Persistence for the signed-in session.
#[async_trait]
pub trait AuthSessionRepository: Send + Sync {
    async fn load(&self) -> Result<Option<SessionUser>>;

    async fn save(&self, user: &SessionUser) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}
