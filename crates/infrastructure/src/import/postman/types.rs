//! Postman Collection v2.x Type Definitions
//!
//! These types mirror the subset of a Postman collection document the mapper
//! reads. Every field defaults so that partial exports still deserialize, and
//! key/value fields accept numbers and booleans as well as strings.

#![allow(missing_docs)]

use serde::Deserialize;
use serde_json::Value;

use crate::import::common::{lenient_opt_string, lenient_string, value_to_string};

/// Root structure for a Postman collection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanCollection {
    #[serde(default)]
    pub info: PostmanInfo,
    #[serde(default, alias = "items")]
    pub item: Vec<PostmanItem>,
    #[serde(default)]
    pub auth: Option<PostmanAuth>,
    #[serde(default)]
    pub event: Vec<Value>,
}

/// Collection metadata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanInfo {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub name: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
}

/// A folder (has `item`) or a request (has `request`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, alias = "items")]
    pub item: Option<Vec<Self>>,
    #[serde(default)]
    pub request: Option<PostmanRequestField>,
    #[serde(default)]
    pub event: Vec<Value>,
}

impl PostmanItem {
    /// Returns true if this item is a folder (has sub-items)
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        self.item.is_some()
    }

    /// Returns true if this item is a request
    #[must_use]
    pub const fn is_request(&self) -> bool {
        self.request.is_some()
    }
}

/// `request` is either a full object or a bare URL string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostmanRequestField {
    Url(String),
    Full(Box<PostmanRequest>),
}

impl PostmanRequestField {
    /// Normalizes the bare-URL form into a GET request.
    #[must_use]
    pub fn into_request(self) -> PostmanRequest {
        match self {
            Self::Url(url) => PostmanRequest {
                url: PostmanUrl::Simple(url),
                ..PostmanRequest::default()
            },
            Self::Full(request) => *request,
        }
    }
}

/// Postman request definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub method: String,
    #[serde(default)]
    pub url: PostmanUrl,
    #[serde(default)]
    pub header: Vec<PostmanKeyValue>,
    #[serde(default)]
    pub body: Option<PostmanBody>,
    #[serde(default)]
    pub auth: Option<PostmanAuth>,
}

/// URL can be either a simple string or a structured object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub enum PostmanUrl {
    #[default]
    Empty,
    Simple(String),
    Structured(PostmanUrlStructured),
}

impl PostmanUrl {
    /// Returns the query parameters of the structured form.
    #[must_use]
    pub fn query(&self) -> &[PostmanKeyValue] {
        match self {
            Self::Structured(s) => &s.query,
            Self::Empty | Self::Simple(_) => &[],
        }
    }
}

/// Structured URL object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanUrlStructured {
    #[serde(default, deserialize_with = "lenient_string")]
    pub raw: String,
    #[serde(default)]
    pub query: Vec<PostmanKeyValue>,
    #[serde(default)]
    pub variable: Vec<PostmanPathVariable>,
}

/// Path variable for `:name` URL tokens
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanPathVariable {
    #[serde(default, deserialize_with = "lenient_string")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub default: Option<String>,
}

/// Header, query parameter, or form field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanKeyValue {
    #[serde(default, deserialize_with = "lenient_string")]
    pub key: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanBody {
    #[serde(default)]
    pub mode: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub raw: Option<String>,
    #[serde(default)]
    pub urlencoded: Vec<PostmanKeyValue>,
    #[serde(default)]
    pub formdata: Vec<PostmanKeyValue>,
    #[serde(default)]
    pub graphql: Option<Value>,
    #[serde(default)]
    pub options: Option<PostmanBodyOptions>,
}

impl PostmanBody {
    /// Returns the `options.raw.language` hint, lowercased.
    #[must_use]
    pub fn raw_language(&self) -> Option<String> {
        self.options
            .as_ref()
            .and_then(|o| o.raw.as_ref())
            .and_then(|r| r.language.as_deref())
            .map(str::to_ascii_lowercase)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanBodyOptions {
    #[serde(default)]
    pub raw: Option<PostmanRawOptions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanRawOptions {
    #[serde(default)]
    pub language: Option<String>,
}

/// Authentication configuration
///
/// Parameters are a `[{key, value}]` list in v2.1 and a plain object in v2.0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanAuth {
    #[serde(rename = "type", default)]
    pub auth_type: String,
    #[serde(default)]
    pub bearer: Value,
    #[serde(default)]
    pub basic: Value,
}

impl PostmanAuth {
    /// Looks up a parameter in either parameter layout.
    #[must_use]
    pub fn param(params: &Value, key: &str) -> Option<String> {
        match params {
            Value::Array(entries) => entries
                .iter()
                .find(|entry| entry.get("key").and_then(Value::as_str) == Some(key))
                .and_then(|entry| entry.get("value"))
                .map(value_to_string),
            Value::Object(map) => map.get(key).map(value_to_string),
            _ => None,
        }
    }
}
