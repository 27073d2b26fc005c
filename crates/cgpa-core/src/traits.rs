//! Core trait definition for durable key-value storage.
//!
//! Implemented by the backends in `cgpa-store`. The session layer only ever
//! talks to a `dyn KeyValueStore`, so it never knows where bytes land.

use async_trait::async_trait;
use futures::future::join_all;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Key-value store trait
// ---------------------------------------------------------------------------

/// String-keyed, string-valued durable storage.
///
/// Every operation may fail with an I/O condition. Callers log those
/// failures; they never roll back in-memory state.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Human-readable backend name (e.g. "file").
    fn name(&self) -> &str;

    /// Read a value, `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a single key. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Remove every key this store holds.
    async fn clear(&self) -> Result<(), StoreError>;

    /// Remove several keys, attempting each one independently.
    ///
    /// A failure on one key does not stop the others; the keys that could
    /// not be removed are reported together in `StoreError::PartialRemoval`.
    async fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        let outcomes = join_all(keys.iter().map(|key| self.remove(key))).await;

        let mut failed = Vec::new();
        for (key, outcome) in keys.iter().zip(outcomes) {
            if let Err(e) = outcome {
                tracing::warn!("failed to remove '{key}': {e}");
                failed.push((*key).to_string());
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(StoreError::PartialRemoval { failed })
        }
    }
}
