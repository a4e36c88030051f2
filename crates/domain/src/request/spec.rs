//! Request definition type

use serde::{Deserialize, Serialize};

use super::{AuthConfig, BodyType, Header, HttpMethod, QueryParam};
use crate::id::{Id, generate_id};

/// One HTTP call definition stored in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Unique identifier for this request
    pub id: Id,
    /// Human-readable name
    pub name: String,
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// Target URL (may contain variable placeholders)
    #[serde(default)]
    pub url: String,
    /// Query parameters, in order
    #[serde(default)]
    pub params: Vec<QueryParam>,
    /// HTTP headers, in order
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Raw body text, interpreted according to `body_type`
    #[serde(default)]
    pub body: String,
    /// How `body` is interpreted
    #[serde(default)]
    pub body_type: BodyType,
    /// Ancestor-ID chain: `[collection]` or `[collection, folder]`
    #[serde(default)]
    pub folder_path: Vec<Id>,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Request {
    /// Creates a new request with default values and a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            method: HttpMethod::default(),
            url: String::new(),
            params: Vec::new(),
            headers: Vec::new(),
            body: String::new(),
            body_type: BodyType::None,
            folder_path: Vec::new(),
            auth: AuthConfig::None,
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::new(name)
        }
    }

    /// Returns a deep copy with a fresh ID and `suffix` appended to the name.
    ///
    /// The copy owns its own `params`/`headers` vectors; editing one never
    /// affects the other.
    #[must_use]
    pub fn duplicate(&self, suffix: &str) -> Self {
        Self {
            id: generate_id(),
            name: format!("{}{suffix}", self.name),
            ..self.clone()
        }
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new("New Request")
    }
}
