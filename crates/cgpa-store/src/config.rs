//! Configuration loading and the store factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cgpa_core::traits::KeyValueStore;

use crate::file::FileStore;
use crate::memory::MemoryStore;

/// Which backend holds the session keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// One file per key under `data_dir`.
    File {
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,
    },
    /// Process-local; nothing survives the process.
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("cgpa"),
        _ => PathBuf::from(".cgpa"),
    }
}

/// Top-level cgpa configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CgpaConfig {
    /// Grading system used when a command does not name one.
    #[serde(default)]
    pub default_system: Option<String>,
    /// Storage backend.
    #[serde(default)]
    pub store: StoreConfig,
}

impl CgpaConfig {
    /// Point the store at `dir`, switching to the file backend if needed.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store = StoreConfig::File {
            data_dir: dir.into(),
        };
        self
    }

    /// The explicit choice if given, else the configured default.
    pub fn system_or_default(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.default_system.clone())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never expanded again. An
/// unterminated `${` is kept as literal text.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_store_config(config: &StoreConfig) -> StoreConfig {
    match config {
        StoreConfig::File { data_dir } => StoreConfig::File {
            data_dir: PathBuf::from(resolve_env_vars(&data_dir.to_string_lossy())),
        },
        StoreConfig::Memory => StoreConfig::Memory,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `cgpa.toml` in the current directory
/// 2. `~/.config/cgpa/config.toml`
///
/// Environment variable overrides: `CGPA_DATA_DIR`, `CGPA_SYSTEM`.
pub fn load_config() -> Result<CgpaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CgpaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("cgpa.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CgpaConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CgpaConfig::default(),
    };

    if let Ok(dir) = std::env::var("CGPA_DATA_DIR") {
        if !dir.is_empty() {
            config = config.with_data_dir(dir);
        }
    }
    if let Ok(system) = std::env::var("CGPA_SYSTEM") {
        if !system.is_empty() {
            config.default_system = Some(system);
        }
    }

    config.default_system = config
        .default_system
        .as_deref()
        .map(resolve_env_vars)
        .filter(|s| !s.trim().is_empty());
    config.store = resolve_store_config(&config.store);

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("cgpa"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config {
        StoreConfig::File { data_dir } => {
            if data_dir.exists() && !data_dir.is_dir() {
                anyhow::bail!("data dir is not a directory: {}", data_dir.display());
            }
            Ok(Arc::new(FileStore::new(data_dir.clone())))
        }
        StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
