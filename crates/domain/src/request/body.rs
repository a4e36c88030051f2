//! Request body type tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Tag selecting how a request's `body` text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BodyType {
    /// No body
    #[default]
    None,
    /// JSON document
    Json,
    /// Multipart form data, one `key: value` pair per line
    FormData,
    /// URL encoded form, `&`-joined `key=value` pairs
    FormUrlencoded,
    /// GraphQL query document
    Graphql,
    /// XML document
    Xml,
    /// Any other text
    PlainText,
}

impl BodyType {
    /// Returns the tag as it appears in persisted snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::FormData => "form-data",
            Self::FormUrlencoded => "form-urlencoded",
            Self::Graphql => "graphql",
            Self::Xml => "xml",
            Self::PlainText => "plain-text",
        }
    }

    /// Returns the conventional `Content-Type` for this body type.
    #[must_use]
    pub const fn content_type(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json | Self::Graphql => Some("application/json"),
            Self::FormData => Some("multipart/form-data"),
            Self::FormUrlencoded => Some("application/x-www-form-urlencoded"),
            Self::Xml => Some("application/xml"),
            Self::PlainText => Some("text/plain"),
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "none" => Ok(Self::None),
            "json" => Ok(Self::Json),
            "form-data" => Ok(Self::FormData),
            "form-urlencoded" => Ok(Self::FormUrlencoded),
            "graphql" => Ok(Self::Graphql),
            "xml" => Ok(Self::Xml),
            "plain-text" => Ok(Self::PlainText),
            other => Err(DomainError::UnknownBodyType(other.to_string())),
        }
    }
}
