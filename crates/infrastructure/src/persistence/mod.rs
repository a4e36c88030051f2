//! Snapshot persistence adapters.

mod file_system;
mod json_store;
mod memory_store;

pub use file_system::TokioFileSystem;
pub use json_store::{CURRENT_SCHEMA_VERSION, JsonFileCollectionStore, SNAPSHOT_FILE};
pub use memory_store::InMemoryCollectionStore;
