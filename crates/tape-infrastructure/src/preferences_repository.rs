//! Preferences repository backed by local storage.
//!
//! Theme and model are plain text values under their own keys; the
//! first-run notice is a marker key.

use async_trait::async_trait;
use std::sync::Arc;

use tape_core::Result;
use tape_core::state::{Preferences, PreferencesRepository, Theme, is_supported_model};
use tape_core::storage::{LocalStorage, keys};

const NOTICE_SEEN: &str = "true";

pub struct LocalStoragePreferencesRepository {
    storage: Arc<dyn LocalStorage>,
}

impl LocalStoragePreferencesRepository {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl PreferencesRepository for LocalStoragePreferencesRepository {
    async fn load(&self) -> Result<Preferences> {
        let mut preferences = Preferences::default();

        if let Some(value) = self.storage.get_item(keys::THEME).await? {
            match value.trim().parse::<Theme>() {
                Ok(theme) => preferences.theme = theme,
                Err(_) => tracing::error!(value = %value, "Ignoring unknown stored theme"),
            }
        }

        if let Some(value) = self.storage.get_item(keys::MODEL).await? {
            let model = value.trim();
            if is_supported_model(model) {
                preferences.model = model.to_string();
            } else {
                tracing::error!(model, "Ignoring unsupported stored model");
            }
        }

        preferences.first_run_notice_seen = self
            .storage
            .get_item(keys::FIRST_RUN_NOTICE)
            .await?
            .is_some();

        Ok(preferences)
    }

    async fn set_theme(&self, theme: Theme) -> Result<()> {
        self.storage.set_item(keys::THEME, theme.as_ref()).await
    }

    async fn set_model(&self, model: &str) -> Result<()> {
        self.storage.set_item(keys::MODEL, model).await
    }

    async fn mark_first_run_notice_seen(&self) -> Result<()> {
        self.storage
            .set_item(keys::FIRST_RUN_NOTICE, NOTICE_SEEN)
            .await
    }
}
