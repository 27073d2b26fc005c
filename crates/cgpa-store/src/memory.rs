//! In-memory store for tests and ephemeral sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use cgpa_core::error::StoreError;
use cgpa_core::traits::KeyValueStore;

/// A process-local key-value map. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.values.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("gpa").await.unwrap(), None);

        store.set("gpa", "3.5").await.unwrap();
        assert_eq!(store.get("gpa").await.unwrap().as_deref(), Some("3.5"));

        store.set("gpa", "3.7").await.unwrap();
        assert_eq!(store.get("gpa").await.unwrap().as_deref(), Some("3.7"));

        store.remove("gpa").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn remove_many_leaves_other_keys() {
        let store = MemoryStore::with_entries([("gpa", "3.5"), ("cgpa", "3.6"), ("theme", "dark")]);
        store.remove_many(&["gpa", "cgpa", "missing"]).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }
}
