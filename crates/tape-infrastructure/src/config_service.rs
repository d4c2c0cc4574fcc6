//! Configuration service implementation.
//!
//! Loads `AppConfig` from `config.toml`, writing a default file when none
//! exists, and caches the result.

use crate::paths::TapePaths;
use crate::storage::AtomicFile;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tape_core::config::AppConfig;
use tape_core::{Result, TapeError};

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Uses the default `config.toml` location.
    pub fn new() -> Result<Self> {
        let path = TapePaths::config_file().map_err(|e| TapeError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// An unreadable file is logged and the defaults are used.
    pub fn get_config(&self) -> AppConfig {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return cached.clone();
        }

        let loaded = self.load_config().unwrap_or_else(|e| {
            tracing::error!(path = %self.path.display(), "Failed to load config: {}", e);
            AppConfig::default()
        });

        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    fn load_config(&self) -> Result<AppConfig> {
        let file = AtomicFile::new(self.path.clone());
        match file.load()? {
            Some(content) => Ok(toml::from_str(&content)?),
            None => {
                let config = AppConfig::default();
                file.save(&toml::to_string_pretty(&config)?)?;
                tracing::info!(path = %self.path.display(), "Created default config");
                Ok(config)
            }
        }
    }
}
