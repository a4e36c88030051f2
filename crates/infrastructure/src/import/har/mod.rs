//! HAR capture import

mod mapper;
pub mod types;

use serde_json::Value;

pub use mapper::{DEFAULT_COLLECTION_NAME, map_har_document};
pub use types::HarDocument;

use super::ImportResult;
use super::detect::ImportFormat;
use super::error::ImportError;

/// Imports a document already detected as a HAR capture.
///
/// # Errors
///
/// Returns [`ImportError::InvalidFormat`] if the `log` envelope is malformed.
pub fn import(value: Value) -> Result<ImportResult, ImportError> {
    let document: HarDocument = serde_json::from_value(value)
        .map_err(|e| ImportError::invalid(ImportFormat::Har, &e))?;
    Ok(map_har_document(&document))
}
