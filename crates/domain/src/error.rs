//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The body type tag is not one of the known tags.
    #[error("unknown body type: {0}")]
    UnknownBodyType(String),

    /// The item type tag is not one of `collection`, `folder`, `request`.
    #[error("unknown item type: {0}")]
    UnknownItemType(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
