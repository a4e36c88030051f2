//! Background persistence of tree snapshots.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::repository::Snapshot;
use crate::ports::CollectionStore;

/// Saves each published snapshot to a [`CollectionStore`].
///
/// Snapshots published while a save is in flight are coalesced: only the
/// newest one is written next, so the store always ends up with the last
/// committed state.
pub struct SnapshotWriter<S> {
    store: Arc<S>,
    snapshots: watch::Receiver<Snapshot>,
}

impl<S: CollectionStore + 'static> SnapshotWriter<S> {
    /// Creates a writer fed by `snapshots`.
    #[must_use]
    pub const fn new(store: Arc<S>, snapshots: watch::Receiver<Snapshot>) -> Self {
        Self { store, snapshots }
    }

    /// Saves snapshots until the repository is dropped. Returns the number of
    /// successful saves. Failed saves are logged and skipped.
    pub async fn run(mut self) -> usize {
        let mut saved = 0;
        while self.snapshots.changed().await.is_ok() {
            let snapshot = Arc::clone(&self.snapshots.borrow_and_update());
            match self.store.save(&snapshot).await {
                Ok(()) => {
                    saved += 1;
                    tracing::debug!(collections = snapshot.len(), "snapshot saved");
                }
                Err(error) => tracing::warn!(%error, "failed to save snapshot"),
            }
        }
        tracing::debug!(saved, "snapshot writer stopped");
        saved
    }

    /// Runs the writer on the tokio runtime.
    pub fn spawn(self) -> JoinHandle<usize> {
        tokio::spawn(self.run())
    }
}
