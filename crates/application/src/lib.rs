//! Arbor Application - Collection tree and ports
//!
//! This crate defines the application layer with:
//! - The single-writer [`TreeRepository`] that owns the collection forest
//! - Snapshot persistence through the [`CollectionStore`] port
//! - Port traits for the file system and storage

pub mod ports;
pub mod tree;

pub use ports::{CollectionStore, FileSystem, FileSystemError, StorageError};
pub use tree::{SnapshotWriter, Snapshot, TreeConfig, TreeError, TreeRepository, TreeResult};
