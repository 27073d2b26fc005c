pub mod add_course;
pub mod add_semester;
pub mod clear;
pub mod export;
pub mod init;
pub mod shell;
pub mod show;
pub mod systems;

use std::path::PathBuf;

use anyhow::Result;

use cgpa_core::{LookupError, Session, SessionError, StoreError, ValidationError};
use cgpa_store::{create_store, CgpaConfig};

/// Flags shared by every subcommand.
pub struct Globals {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl Globals {
    /// Load the config file, then apply `--data-dir`.
    pub fn load_config(&self) -> Result<CgpaConfig> {
        let config = cgpa_store::config::load_config_from(self.config.as_deref())?;
        Ok(match &self.data_dir {
            Some(dir) => config.with_data_dir(dir.clone()),
            None => config,
        })
    }
}

/// Open the configured store and load the saved session.
pub async fn open_session(config: &CgpaConfig) -> Result<Session> {
    let store = create_store(&config.store)?;
    tracing::debug!("using {} store", store.name());
    Ok(Session::open(store).await)
}

/// Wait for pending writes and report any that failed.
pub async fn close_session(session: Session) {
    warn_failures(&session.close().await);
}

pub fn warn_failures(failures: &[StoreError]) {
    for e in failures {
        eprintln!("Warning: could not save session data: {e}");
    }
}

/// The user-facing message if `err` was caused by bad input.
pub fn validation_message(err: &anyhow::Error) -> Option<String> {
    if let Some(e) = err.downcast_ref::<SessionError>() {
        return e.as_validation().map(ToString::to_string);
    }
    if let Some(e) = err.downcast_ref::<ValidationError>() {
        return Some(e.to_string());
    }
    err.downcast_ref::<LookupError>().map(ToString::to_string)
}
