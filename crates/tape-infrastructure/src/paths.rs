//! Path management for tape configuration and data files.
//!
//! All paths are resolved via `AppPaths` from the version-migrate crate so
//! every platform gets its conventional locations.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/tape/              # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/tape/         # Data directory
//! ├── storage/                 # Local storage, one file per key
//! ├── logs/                    # Daily rolling logs (tape.log.YYYY-MM-DD)
//! └── training/                # Default training export target
//! ```

use std::path::PathBuf;
use version_migrate::AppPaths;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct TapePaths;

impl TapePaths {
    fn app_paths() -> AppPaths {
        AppPaths::new("tape")
    }

    pub fn config_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    pub fn data_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .data_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory backing `FileLocalStorage`.
    pub fn storage_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage"))
    }

    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("logs"))
    }

    pub fn training_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("training"))
    }
}
