//! Insomnia export import

mod mapper;
pub mod types;

use serde_json::Value;

pub use mapper::{DEFAULT_COLLECTION_NAME, map_insomnia_export};
pub use types::InsomniaExport;

use super::ImportResult;
use super::detect::ImportFormat;
use super::error::ImportError;

/// Imports a document already detected as an Insomnia export.
///
/// # Errors
///
/// Returns [`ImportError::InvalidFormat`] if the export envelope is malformed.
pub fn import(value: Value) -> Result<ImportResult, ImportError> {
    let export: InsomniaExport = serde_json::from_value(value)
        .map_err(|e| ImportError::invalid(ImportFormat::Insomnia, &e))?;
    Ok(map_insomnia_export(&export))
}
