//! File-backed local storage: one file per key.

use super::atomic_file::AtomicFile;
use async_trait::async_trait;
use std::path::PathBuf;
use tape_core::storage::LocalStorage;
use tape_core::{Result, TapeError};

use crate::paths::TapePaths;

/// Stores each key in its own file under a directory.
///
/// File operations run on the blocking pool since locking may wait.
#[derive(Debug, Clone)]
pub struct FileLocalStorage {
    dir: PathBuf,
}

impl FileLocalStorage {
    /// Storage in the default data directory.
    pub fn new() -> Result<Self> {
        let dir = TapePaths::storage_dir().map_err(|e| TapeError::config(e.to_string()))?;
        Ok(Self::with_dir(dir))
    }

    /// Storage under a custom directory (for testing).
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(TapeError::invalid_input(format!(
                "invalid storage key '{}'",
                key
            )));
        }
        Ok(AtomicFile::new(self.dir.join(key)))
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| TapeError::internal(format!("storage task failed: {}", e)))?
}

#[async_trait]
impl LocalStorage for FileLocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key)?;
        blocking(move || file.load()).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key)?;
        let value = value.to_string();
        tracing::debug!(key, bytes = value.len(), "Writing storage item");
        blocking(move || file.save(&value)).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let file = self.file_for(key)?;
        blocking(move || file.remove()).await
    }
}
