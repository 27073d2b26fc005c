//! Directory-backed store: one file per key.
//!
//! Values live in `<root>/<key>.value`. Writes go to a sibling `.tmp` file
//! which is then renamed over the target, so a crash mid-write leaves either
//! the old value or the new one, never a torn file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use cgpa_core::error::StoreError;
use cgpa_core::traits::KeyValueStore;

const VALUE_EXT: &str = "value";

/// A `KeyValueStore` persisted under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use `root` as the data directory. It is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{VALUE_EXT}")))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.value_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.value_path(key)?;
        let tmp = path.with_extension(format!("{VALUE_EXT}.tmp"));

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::io(key, e))?;
        fs::write(&tmp, value)
            .await
            .map_err(|e| StoreError::io(key, e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::io(key, e))?;

        tracing::trace!("wrote {} byte(s) to {}", value.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.value_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StoreError::io("*", e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io("*", e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == VALUE_EXT) {
                fs::remove_file(&path)
                    .await
                    .map_err(|e| StoreError::io(&path.display().to_string(), e))?;
            }
        }
        Ok(())
    }
}
