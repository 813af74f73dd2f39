//! Key-value store trait for pluggable persistence backends.

use async_trait::async_trait;

use crate::result::AppResult;

/// Durable map from string keys to serialized collections.
///
/// Values are whole serialized documents (JSON). Writes replace the full
/// value for a key; the last complete write wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Short name of the backend (`"memory"`, `"file"`).
    fn provider_type(&self) -> &str;

    /// Get the value stored under `key`, or `None` if it was never written.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a value exists under `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// List all stored keys in ascending order.
    async fn keys(&self) -> AppResult<Vec<String>>;

    /// Check that the backend is usable.
    async fn health_check(&self) -> AppResult<bool>;
}
