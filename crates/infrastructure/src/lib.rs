//! Arbor Infrastructure - Importers and snapshot storage
//!
//! This crate turns third-party collection formats into the canonical tree
//! and provides concrete implementations of the storage ports defined in
//! the application layer.

pub mod import;
pub mod persistence;
pub mod serialization;

pub use import::{
    CollectionImporter, ImportConfig, ImportError, ImportFormat, ImportPreview, ImportResult,
    ImportWarning, WarningSeverity, WarningStats, detect_format, import_from_curl,
    import_from_file,
};
pub use persistence::{
    CURRENT_SCHEMA_VERSION, InMemoryCollectionStore, JsonFileCollectionStore, SNAPSHOT_FILE,
    TokioFileSystem,
};
pub use serialization::{SerializationError, from_json, to_json_stable, to_json_stable_bytes};
