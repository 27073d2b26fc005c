//! Failure-injecting store wrapper for testing error paths.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cgpa_core::error::StoreError;
use cgpa_core::traits::KeyValueStore;

/// Wraps another store and fails selected operations with
/// [`StoreError::Unavailable`].
///
/// Writes (`set`, `remove`, `clear`) fail when `fail_all_writes` is on or the
/// key was registered with [`FaultyStore::fail_key`]. Reads fail only when
/// `fail_reads` is on.
pub struct FaultyStore {
    inner: Arc<dyn KeyValueStore>,
    failing_keys: Mutex<HashSet<String>>,
    fail_all_writes: AtomicBool,
    fail_reads: AtomicBool,
    gets: AtomicU32,
    sets: AtomicU32,
    removes: AtomicU32,
}

impl FaultyStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner,
            failing_keys: Mutex::new(HashSet::new()),
            fail_all_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            gets: AtomicU32::new(0),
            sets: AtomicU32::new(0),
            removes: AtomicU32::new(0),
        }
    }

    /// Make writes to `key` fail until [`FaultyStore::heal`] is called.
    pub fn fail_key(&self, key: &str) {
        if let Ok(mut keys) = self.failing_keys.lock() {
            keys.insert(key.to_string());
        }
    }

    pub fn set_fail_all_writes(&self, fail: bool) {
        self.fail_all_writes.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Clear every injected failure.
    pub fn heal(&self) {
        if let Ok(mut keys) = self.failing_keys.lock() {
            keys.clear();
        }
        self.set_fail_all_writes(false);
        self.set_fail_reads(false);
    }

    /// Number of `get` calls, failed ones included.
    pub fn get_count(&self) -> u32 {
        self.gets.load(Ordering::Relaxed)
    }

    /// Number of `set` calls, failed ones included.
    pub fn set_count(&self) -> u32 {
        self.sets.load(Ordering::Relaxed)
    }

    /// Number of `remove` calls, failed ones included.
    pub fn remove_count(&self) -> u32 {
        self.removes.load(Ordering::Relaxed)
    }

    fn write_fails(&self, key: &str) -> bool {
        self.fail_all_writes.load(Ordering::Relaxed)
            || self
                .failing_keys
                .lock()
                .map(|keys| keys.contains(key))
                .unwrap_or(false)
    }

    fn unavailable(op: &str, key: &str) -> StoreError {
        StoreError::Unavailable(format!("injected {op} failure for '{key}'"))
    }
}

#[async_trait]
impl KeyValueStore for FaultyStore {
    fn name(&self) -> &str {
        "faulty"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.gets.fetch_add(1, Ordering::Relaxed);
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(Self::unavailable("read", key));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.sets.fetch_add(1, Ordering::Relaxed);
        if self.write_fails(key) {
            return Err(Self::unavailable("write", key));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.removes.fetch_add(1, Ordering::Relaxed);
        if self.write_fails(key) {
            return Err(Self::unavailable("remove", key));
        }
        self.inner.remove(key).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        if self.fail_all_writes.load(Ordering::Relaxed) {
            return Err(Self::unavailable("clear", "*"));
        }
        self.inner.clear().await
    }
}
