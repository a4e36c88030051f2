//! In-memory snapshot store.

use arbor_application::ports::{CollectionStore, StorageError};
use arbor_domain::Collection;
use tokio::sync::Mutex;

/// Keeps the last saved snapshot in memory. Useful for tests and for
/// embedding the tree without a disk.
#[derive(Debug, Default)]
pub struct InMemoryCollectionStore {
    snapshot: Mutex<Vec<Collection>>,
    saves: Mutex<usize>,
}

impl InMemoryCollectionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that loads `collections`.
    #[must_use]
    pub fn with_collections(collections: Vec<Collection>) -> Self {
        Self {
            snapshot: Mutex::new(collections),
            saves: Mutex::new(0),
        }
    }

    /// Returns how many times `save` succeeded.
    pub async fn save_count(&self) -> usize {
        *self.saves.lock().await
    }
}

impl CollectionStore for InMemoryCollectionStore {
    async fn load(&self) -> Result<Vec<Collection>, StorageError> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, collections: &[Collection]) -> Result<(), StorageError> {
        *self.snapshot.lock().await = collections.to_vec();
        *self.saves.lock().await += 1;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_save_replaces_snapshot() {
        let store = InMemoryCollectionStore::with_collections(vec![Collection::new("Old")]);
        let replacement = vec![Collection::new("New")];

        store.save(&replacement).await.unwrap();
        assert_eq!(store.load().await.unwrap(), replacement);
        assert_eq!(store.save_count().await, 1);
    }
}
