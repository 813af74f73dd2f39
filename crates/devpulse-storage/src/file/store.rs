//! File-backed key-value store.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use devpulse_core::error::{AppError, ErrorKind};
use devpulse_core::result::AppResult;
use devpulse_core::traits::store::KeyValueStore;

use crate::keys;

/// Extension of every stored document.
const EXTENSION: &str = "json";

/// Key-value store keeping one document per key under a root directory.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    /// Directory holding all documents.
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `root_path`, creating the directory if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to create store directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a key to its document path.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        if !keys::is_valid(key) {
            return Err(AppError::invalid_argument(format!("Invalid store key: '{key}'")));
        }
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    fn provider_type(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.resolve(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to read key: {key}"),
                e,
            )),
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        let tmp_path = path.with_extension(format!("{EXTENSION}.tmp"));

        fs::write(&tmp_path, value.as_bytes()).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to write key: {key}"),
                e,
            )
        })?;

        fs::rename(&tmp_path, &path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to commit key: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = value.len(), "Wrote store document");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to delete key: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.resolve(key)?;
        fs::try_exists(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to check key: {key}"),
                e,
            )
        })
    }

    async fn keys(&self) -> AppResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Persistence,
                format!("Failed to list store directory: {}", self.root.display()),
                e,
            )
        })?;

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }
}
