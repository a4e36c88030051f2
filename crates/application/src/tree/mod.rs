//! The collection tree: single-writer repository and snapshot persistence.

mod config;
mod error;
mod repository;
mod writer;

pub use config::TreeConfig;
pub use error::{TreeError, TreeResult};
pub use repository::{Snapshot, TreeRepository};
pub use writer::SnapshotWriter;
