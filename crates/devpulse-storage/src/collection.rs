//! A JSON collection mirrored into a key-value store.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use devpulse_core::error::{AppError, ErrorKind};
use devpulse_core::result::AppResult;
use devpulse_core::traits::store::KeyValueStore;

/// An in-memory collection whose full contents are written under one key
/// after every mutation.
///
/// The in-memory items are authoritative. When a write fails the
/// collection is marked dirty and the next [`persist`](Self::persist) or
/// [`flush`](Self::flush) writes the whole collection again.
pub struct PersistentCollection<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    items: Vec<T>,
    dirty: bool,
}

impl<T> fmt::Debug for PersistentCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentCollection")
            .field("key", &self.key)
            .field("len", &self.items.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl<T> PersistentCollection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Load the collection stored under `key`.
    ///
    /// When nothing is stored yet, `seed` supplies the initial items and
    /// they are written immediately. If that write fails the collection is
    /// still returned, dirty, and the seed is written by the next
    /// successful persist or flush. A stored value that does not decode is
    /// a serialization error; it is never silently replaced.
    pub async fn load<F>(store: Arc<dyn KeyValueStore>, key: impl Into<String>, seed: F) -> AppResult<Self>
    where
        F: FnOnce() -> Vec<T>,
    {
        let key = key.into();
        match store.get(&key).await? {
            Some(raw) => {
                let items: Vec<T> = serde_json::from_str(&raw).map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Serialization,
                        format!("Stored value under '{key}' is not a valid collection"),
                        e,
                    )
                })?;
                debug!(key = %key, count = items.len(), "Loaded collection");
                Ok(Self {
                    store,
                    key,
                    items,
                    dirty: false,
                })
            }
            None => {
                let items = seed();
                info!(key = %key, count = items.len(), "Collection absent, seeding");
                let mut collection = Self {
                    store,
                    key,
                    items,
                    dirty: true,
                };
                if collection.persist().await.is_err() {
                    warn!(key = %collection.key, "Seed kept in memory until the store accepts writes");
                }
                Ok(collection)
            }
        }
    }

    /// The store key backing this collection.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutably borrow the items. Call [`persist`](Self::persist) afterwards.
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        self.dirty = true;
        &mut self.items
    }

    /// Clone of all items.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }

    /// Whether the durable copy is behind the in-memory items.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the full collection to the store.
    pub async fn persist(&mut self) -> AppResult<()> {
        self.dirty = true;
        let encoded = serde_json::to_string(&self.items)?;
        match self.store.set(&self.key, &encoded).await {
            Ok(()) => {
                self.dirty = false;
                debug!(key = %self.key, count = self.items.len(), "Persisted collection");
                Ok(())
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to persist collection, keeping in-memory state");
                Err(AppError::with_source(
                    ErrorKind::Persistence,
                    format!("Failed to persist '{}'", self.key),
                    e,
                ))
            }
        }
    }

    /// Write the collection if a previous write failed.
    pub async fn flush(&mut self) -> AppResult<()> {
        if self.dirty {
            self.persist().await
        } else {
            Ok(())
        }
    }
}
