//! Single-writer save queue.
//!
//! All persistence writes go through one background task that drains an
//! unbounded channel in order. Queuing never blocks the caller, and because
//! only this task touches the store a later save can never be overtaken by an
//! earlier one.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::StoreError;
use crate::persist::{Snapshot, SESSION_KEYS};
use crate::traits::KeyValueStore;

enum WriteOp {
    Save(Snapshot),
    Clear,
    Flush(oneshot::Sender<Vec<StoreError>>),
}

/// Handle to the background writer task.
pub struct SaveQueue {
    tx: mpsc::UnboundedSender<WriteOp>,
    handle: JoinHandle<()>,
}

impl SaveQueue {
    /// Spawn the writer on the current tokio runtime.
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(store, rx));
        Self { tx, handle }
    }

    /// Queue a full-overwrite save of `snapshot`.
    pub fn save(&self, snapshot: Snapshot) {
        self.send(WriteOp::Save(snapshot));
    }

    /// Queue removal of every session key.
    pub fn clear(&self) {
        self.send(WriteOp::Clear);
    }

    /// Wait until every write queued so far has completed, returning the
    /// failures recorded since the previous flush.
    pub async fn flush(&self) -> Vec<StoreError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.send(WriteOp::Flush(done_tx));
        done_rx.await.unwrap_or_default()
    }

    /// Flush, then stop the writer task.
    pub async fn shutdown(self) -> Vec<StoreError> {
        let failures = self.flush().await;
        drop(self.tx);
        if let Err(e) = self.handle.await {
            tracing::warn!("save queue task ended abnormally: {e}");
        }
        failures
    }

    fn send(&self, op: WriteOp) {
        if self.tx.send(op).is_err() {
            tracing::warn!("save queue is closed; dropping write");
        }
    }
}

async fn run(store: Arc<dyn KeyValueStore>, mut rx: mpsc::UnboundedReceiver<WriteOp>) {
    let mut failures = Vec::new();

    while let Some(op) = rx.recv().await {
        match op {
            WriteOp::Save(snapshot) => {
                for (key, value) in snapshot.entries() {
                    if let Err(e) = store.set(key, value).await {
                        tracing::warn!("failed to persist '{key}' to {} store: {e}", store.name());
                        failures.push(e);
                    }
                }
                tracing::debug!("saved session snapshot to {} store", store.name());
            }
            WriteOp::Clear => match store.remove_many(&SESSION_KEYS).await {
                Ok(()) => tracing::debug!("cleared session keys from {} store", store.name()),
                Err(e) => {
                    tracing::warn!("failed to clear {} store: {e}", store.name());
                    failures.push(e);
                }
            },
            WriteOp::Flush(done) => {
                let _ = done.send(std::mem::take(&mut failures));
            }
        }
    }
}
