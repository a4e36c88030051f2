//! Import error types

use thiserror::Error;

use super::detect::ImportFormat;

/// Reasons an import produced no collection at all.
///
/// Field-level problems never surface here; they become
/// [`ImportWarning`](super::ImportWarning)s instead.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Input was blank.
    #[error("Nothing to import: input is empty")]
    Empty,

    /// Input exceeds the configured maximum size.
    #[error("File too large: {size} bytes exceeds maximum of {max} bytes")]
    FileTooLarge {
        /// Actual size in bytes
        size: usize,
        /// Maximum allowed size in bytes
        max: usize,
    },

    /// Input is neither JSON nor named like a YAML file.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Input was named like a YAML file but could not be parsed.
    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    /// Input parsed but matches no known format signature.
    #[error("Unrecognized format: not a Postman, Insomnia, Swagger/OpenAPI or HAR document")]
    UnrecognizedFormat,

    /// Input matched a format signature but does not fit its schema.
    #[error("Invalid {format} document: {reason}")]
    InvalidFormat {
        /// The detected format
        format: ImportFormat,
        /// Deserializer message
        reason: String,
    },

    /// The import produced more nodes than allowed.
    #[error("Too many items: {count} exceeds maximum of {max}")]
    TooManyItems {
        /// Produced folder and request count
        count: usize,
        /// Maximum allowed items
        max: usize,
    },
}

impl ImportError {
    pub(crate) fn invalid(format: ImportFormat, error: &impl std::fmt::Display) -> Self {
        Self::InvalidFormat {
            format,
            reason: error.to_string(),
        }
    }
}
