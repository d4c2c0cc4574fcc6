//! Preferences repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::model::{Preferences, Theme};

/// Repository for shell preferences. Each preference is stored separately.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Loads all preferences, falling back to defaults for missing or
    /// unreadable values.
    async fn load(&self) -> Result<Preferences>;

    async fn set_theme(&self, theme: Theme) -> Result<()>;

    async fn set_model(&self, model: &str) -> Result<()>;

    async fn mark_first_run_notice_seen(&self) -> Result<()>;
}
