//! Local account bookkeeping.

use super::error::AuthError;
use super::model::{SessionUser, User, UserDirectory};
use super::repository::{AuthSessionRepository, UserDirectoryRepository};
use std::sync::Arc;

/// Account directory plus the single signed-in session (or guest).
pub struct AuthStore {
    users: Arc<dyn UserDirectoryRepository>,
    sessions: Arc<dyn AuthSessionRepository>,
    directory: UserDirectory,
    current: Option<SessionUser>,
}

impl AuthStore {
    /// Restores the directory and any persisted session.
    ///
    /// Unreadable storage is logged and treated as empty.
    pub async fn restore(
        users: Arc<dyn UserDirectoryRepository>,
        sessions: Arc<dyn AuthSessionRepository>,
    ) -> Self {
        let directory = users.load().await.unwrap_or_else(|e| {
            tracing::error!("Failed to load user directory: {}", e);
            UserDirectory::default()
        });
        let current = sessions.load().await.unwrap_or_else(|e| {
            tracing::error!("Failed to load auth session: {}", e);
            None
        });

        if let Some(user) = &current {
            tracing::info!(email = %user.email, "Restored session");
        }

        Self {
            users,
            sessions,
            directory,
            current,
        }
    }

    /// Registers an account and signs it in.
    pub async fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError> {
        let email = email.trim();
        if self.directory.contains(email) {
            tracing::warn!(email, "Sign up rejected: duplicate account");
            return Err(AuthError::DuplicateAccount(email.to_string()));
        }

        let user = User::new(name.trim(), email, password);
        let session = SessionUser::from(&user);

        let mut directory = self.directory.clone();
        directory.insert(user);
        self.users.save(&directory).await?;
        self.directory = directory;

        self.establish(session).await
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let email = email.trim();
        let user = self
            .directory
            .get(email)
            .ok_or_else(|| AuthError::NoSuchAccount(email.to_string()))?;
        if user.password != password {
            tracing::warn!(email, "Sign in rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let session = SessionUser::from(user);
        self.establish(session).await
    }

    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.sessions.clear().await?;
        if let Some(user) = self.current.take() {
            tracing::info!(email = %user.email, "Signed out");
        }
        Ok(())
    }

    /// The signed-in user, or `None` for a guest.
    pub fn current_user(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    async fn establish(&mut self, session: SessionUser) -> Result<SessionUser, AuthError> {
        self.sessions.save(&session).await?;
        tracing::info!(email = %session.email, "Signed in");
        self.current = Some(session.clone());
        Ok(session)
    }
}
