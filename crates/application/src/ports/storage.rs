//! Snapshot storage port

use std::future::Future;

use arbor_domain::Collection;

/// Error type for snapshot storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The stored snapshot could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The stored snapshot was written by a newer schema.
    #[error("Schema version mismatch: expected at most {expected}, found {found}")]
    SchemaMismatch {
        /// Highest supported schema version.
        expected: u32,
        /// Found schema version.
        found: u32,
    },

    /// The backing medium failed.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Port for persisting the whole forest as one snapshot.
///
/// Implementations only ever see complete snapshots; there are no deltas.
pub trait CollectionStore: Send + Sync {
    /// Loads the last saved forest. An empty store yields an empty forest.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot exists but cannot be read or decoded.
    fn load(&self) -> impl Future<Output = Result<Vec<Collection>, StorageError>> + Send;

    /// Overwrites the stored forest with `collections`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or written.
    fn save(
        &self,
        collections: &[Collection],
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}
