//! Postman Collection import
//!
//! Converts Postman Collection v2.0/v2.1 documents into a canonical
//! collection.

mod mapper;
pub mod types;

use serde_json::Value;

pub use mapper::{DEFAULT_COLLECTION_NAME, map_postman_collection};
pub use types::PostmanCollection;

use super::config::ImportConfig;
use super::detect::ImportFormat;
use super::error::ImportError;
use super::ImportResult;

/// Imports a document already detected as Postman.
///
/// # Errors
///
/// Returns [`ImportError::InvalidFormat`] if the document does not fit the
/// Postman schema.
pub fn import(value: Value, config: &ImportConfig) -> Result<ImportResult, ImportError> {
    let source: PostmanCollection = serde_json::from_value(value)
        .map_err(|e| ImportError::invalid(ImportFormat::Postman, &e))?;
    Ok(map_postman_collection(&source, config))
}
