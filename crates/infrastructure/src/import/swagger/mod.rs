//! Swagger 2 / OpenAPI 3 import

mod mapper;
mod schema;
pub mod types;

use serde_json::Value;

pub use mapper::{DEFAULT_COLLECTION_NAME, map_swagger_document};
pub use schema::RefResolver;
pub use types::SwaggerDocument;

use super::ImportResult;
use super::detect::ImportFormat;
use super::error::ImportError;

/// Imports a document already detected as Swagger/OpenAPI.
///
/// # Errors
///
/// Returns [`ImportError::InvalidFormat`] if the document skeleton (info,
/// servers, paths) is malformed.
pub fn import(value: Value) -> Result<ImportResult, ImportError> {
    let document: SwaggerDocument = serde_json::from_value(value.clone())
        .map_err(|e| ImportError::invalid(ImportFormat::Swagger, &e))?;
    Ok(map_swagger_document(&document, &value))
}
