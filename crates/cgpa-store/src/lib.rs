//! cgpa-store: Key-value store backends.
//!
//! Implements the `KeyValueStore` trait for a directory on disk and for
//! process memory, plus a fault-injecting wrapper for tests, and loads the
//! configuration that selects between them.

pub mod config;
pub mod faulty;
pub mod file;
pub mod memory;

pub use cgpa_core::error::StoreError;
pub use config::{create_store, load_config, CgpaConfig, StoreConfig};
pub use faulty::FaultyStore;
pub use file::FileStore;
pub use memory::MemoryStore;
