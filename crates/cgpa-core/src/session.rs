//! Session lifecycle.
//!
//! A `Session` owns the single `SessionState` of a running process, applies
//! engine operations to it, and hands a full snapshot to the save queue
//! after every successful mutation. Lifecycle:
//!
//! ```text
//! Uninitialized -> Loading -> Ready -> (mutation) -> Ready
//! ```
//!
//! Clearing resets the state to empty and stays `Ready`.

use std::fmt;
use std::sync::Arc;

use crate::engine;
use crate::error::{SessionError, StoreError};
use crate::model::SessionState;
use crate::persist::{self, Snapshot};
use crate::traits::KeyValueStore;
use crate::writer::SaveQueue;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Uninitialized => write!(f, "uninitialized"),
            Phase::Loading => write!(f, "loading"),
            Phase::Ready => write!(f, "ready"),
        }
    }
}

/// The engine-layer owner of one session's state.
pub struct Session {
    state: SessionState,
    phase: Phase,
    store: Arc<dyn KeyValueStore>,
    queue: SaveQueue,
}

impl Session {
    /// Create an uninitialized session backed by `store`.
    ///
    /// Must be called inside a tokio runtime: the save queue task is spawned
    /// immediately.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let queue = SaveQueue::spawn(Arc::clone(&store));
        Self {
            state: SessionState::new(),
            phase: Phase::Uninitialized,
            store,
            queue,
        }
    }

    /// Create a session and load it in one step.
    pub async fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let mut session = Self::new(store);
        session.load().await;
        session
    }

    /// Rehydrate state from the store. Never fails: unreadable or malformed
    /// values resolve to empty.
    pub async fn load(&mut self) {
        self.phase = Phase::Loading;
        // Pending writes must land before we read them back.
        for e in self.queue.flush().await {
            tracing::warn!("write failed before reload: {e}");
        }

        let restored = persist::load(self.store.as_ref()).await;
        self.state = restored.into_state();
        self.phase = Phase::Ready;

        tracing::debug!(
            "loaded {} course(s) from {} store (gpa {:?}, cgpa {:?})",
            self.state.courses().len(),
            self.store.name(),
            self.state.gpa(),
            self.state.cgpa()
        );
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Validate and append a course, then queue a save. Returns the new GPA.
    pub fn add_course(
        &mut self,
        course_name: &str,
        grade_label: &str,
        credit_text: &str,
        system_id: &str,
    ) -> Result<f64, SessionError> {
        self.ensure_ready()?;
        let (next, gpa) =
            engine::add_course(&self.state, course_name, grade_label, credit_text, system_id)?;
        self.commit(next);
        Ok(gpa)
    }

    /// Validate and file a semester against the current GPA, then queue a
    /// save. Returns the new CGPA.
    pub fn add_semester(&mut self, prior_gpa_text: &str) -> Result<f64, SessionError> {
        self.ensure_ready()?;
        let (next, cgpa) = engine::add_semester(&self.state, prior_gpa_text, self.state.gpa())?;
        self.commit(next);
        Ok(cgpa)
    }

    /// Reset to an empty state and queue removal of every session key.
    ///
    /// Memory is cleared unconditionally; a failed removal only surfaces on
    /// the next flush.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.ensure_ready()?;
        self.state = engine::clear_all(&self.state);
        self.queue.clear();
        tracing::debug!("session cleared");
        Ok(())
    }

    /// Wait for queued writes; returns failures since the last flush.
    pub async fn flush(&self) -> Vec<StoreError> {
        self.queue.flush().await
    }

    /// Flush and stop the writer.
    pub async fn close(self) -> Vec<StoreError> {
        self.queue.shutdown().await
    }

    fn ensure_ready(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Ready => Ok(()),
            other => Err(SessionError::NotReady(other)),
        }
    }

    fn commit(&mut self, next: SessionState) {
        self.state = next;
        match Snapshot::capture(&self.state) {
            Ok(snapshot) => self.queue.save(snapshot),
            Err(e) => tracing::warn!("failed to encode session snapshot: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;
    use crate::error::ValidationError;

    #[derive(Default)]
    struct MapStore {
        values: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStore for MapStore {
        fn name(&self) -> &str {
            "map"
        }

        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.values.lock().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.values
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.values.lock().await.remove(key);
            Ok(())
        }

        async fn clear(&self) -> Result<(), StoreError> {
            self.values.lock().await.clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn mutations_before_load_are_rejected() {
        let mut session = Session::new(Arc::new(MapStore::default()));
        assert_eq!(session.phase(), Phase::Uninitialized);
        let err = session.add_course("CSE220", "A", "3", "NSU").unwrap_err();
        assert!(matches!(err, SessionError::NotReady(Phase::Uninitialized)));
        assert!(session.clear().is_err());
    }

    #[tokio::test]
    async fn load_moves_to_ready() {
        let session = Session::open(Arc::new(MapStore::default())).await;
        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.state().is_empty());
    }

    #[tokio::test]
    async fn add_course_queues_full_snapshot() {
        let store = Arc::new(MapStore::default());
        let mut session = Session::open(store.clone()).await;
        session.add_course("CSE220", "A-", "3", "NSU").unwrap();
        assert!(session.flush().await.is_empty());

        let values = store.values.lock().await;
        assert_eq!(
            persist::decode_scalar(values.get("gpa").map(String::as_str)),
            session.state().gpa()
        );
        assert!(values["courseList"].contains("CSE220"));
        assert_eq!(values["cgpa"], "0");
    }

    #[tokio::test]
    async fn validation_error_does_not_touch_store() {
        let store = Arc::new(MapStore::default());
        let mut session = Session::open(store.clone()).await;
        let err = session.add_semester("3.5").unwrap_err();
        assert!(matches!(
            err.as_validation(),
            Some(ValidationError::MissingCurrentGpa)
        ));
        session.flush().await;
        assert!(store.values.lock().await.is_empty());
    }
}
