//! Snapshot store backed by one JSON document on disk.

use std::path::{Path, PathBuf};

use arbor_application::ports::{CollectionStore, FileSystem, StorageError};
use arbor_domain::Collection;
use serde::{Deserialize, Serialize};

use crate::serialization::{from_json, to_json_stable_bytes};

/// Conventional snapshot file name.
pub const SNAPSHOT_FILE: &str = "collections.json";

/// Schema version written by this build. Newer files are refused.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    schema_version: u32,
    collections: &'a [Collection],
}

#[derive(Deserialize)]
struct SnapshotDocument {
    schema_version: u32,
    #[serde(default)]
    collections: Vec<Collection>,
}

/// Stores the whole forest in a single deterministic JSON file.
///
/// Saves go to a sibling temp file first and are renamed over the
/// snapshot, so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug)]
pub struct JsonFileCollectionStore<F: FileSystem> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> JsonFileCollectionStore<F> {
    /// Creates a store writing to `path`.
    #[must_use]
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Creates a store writing [`SNAPSHOT_FILE`] inside `dir`.
    #[must_use]
    pub fn in_dir(fs: F, dir: &Path) -> Self {
        Self::new(fs, dir.join(SNAPSHOT_FILE))
    }

    /// Returns the snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<F: FileSystem> CollectionStore for JsonFileCollectionStore<F> {
    async fn load(&self) -> Result<Vec<Collection>, StorageError> {
        if !self.fs.exists(&self.path).await {
            tracing::debug!(path = %self.path.display(), "No snapshot yet, starting empty");
            return Ok(Vec::new());
        }
        let content = self
            .fs
            .read_file_string(&self.path)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let document: SnapshotDocument =
            from_json(&content).map_err(|e| StorageError::Serialization(e.to_string()))?;

        if document.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(StorageError::SchemaMismatch {
                expected: CURRENT_SCHEMA_VERSION,
                found: document.schema_version,
            });
        }
        Ok(document.collections)
    }

    async fn save(&self, collections: &[Collection]) -> Result<(), StorageError> {
        let bytes = to_json_stable_bytes(&SnapshotRef {
            schema_version: CURRENT_SCHEMA_VERSION,
            collections,
        })
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let temp = self.temp_path();
        self.fs
            .write_file(&temp, &bytes)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        self.fs
            .rename(&temp, &self.path)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::persistence::TokioFileSystem;
    use arbor_domain::{CollectionItem, Folder, Request};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store(temp: &TempDir) -> JsonFileCollectionStore<TokioFileSystem> {
        JsonFileCollectionStore::in_dir(TokioFileSystem::new(), temp.path())
    }

    fn forest() -> Vec<Collection> {
        let mut collection = Collection::new("Shop");
        let mut folder = Folder::new("Cart");
        folder.items.push(Request::get("Add", "https://shop.test/cart"));
        collection.add_item(CollectionItem::Folder(folder));
        collection.add_item(CollectionItem::Request(Request::get(
            "Ping",
            "https://shop.test/ping",
        )));
        vec![collection, Collection::new("Empty")]
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        assert!(store(&temp).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let forest = forest();

        store.save(&forest).await.unwrap();
        assert_eq!(store.load().await.unwrap(), forest);
        assert!(!temp.path().join("collections.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_output_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let forest = forest();

        store.save(&forest).await.unwrap();
        let first = std::fs::read_to_string(store.path()).unwrap();
        store.save(&forest).await.unwrap();
        let second = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("{\n  \"schema_version\": 1,"));
    }

    #[tokio::test]
    async fn test_newer_schema_is_rejected() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        std::fs::write(store.path(), r#"{"schema_version": 9, "collections": []}"#).unwrap();

        let result = store.load().await;
        assert!(matches!(
            result,
            Err(StorageError::SchemaMismatch {
                expected: 1,
                found: 9
            })
        ));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        std::fs::write(store.path(), "{ nope").unwrap();
        assert!(matches!(
            store.load().await,
            Err(StorageError::Serialization(_))
        ));
    }
}
