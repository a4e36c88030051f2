//! Swagger 2 / OpenAPI 3 type definitions
//!
//! Only the request-shaping parts of a document are modelled. Schemas stay
//! raw JSON so `$ref`s can be resolved against the whole document.

#![allow(missing_docs)]

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::import::common::lenient_opt_string;

/// HTTP method keys of a path item, in the order OpenAPI lists them
pub const OPERATION_METHODS: [&str; 8] =
    ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// Root document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerDocument {
    #[serde(default)]
    pub swagger: Option<Value>,
    #[serde(default)]
    pub openapi: Option<Value>,
    #[serde(default)]
    pub info: SwaggerInfo,
    #[serde(default)]
    pub servers: Vec<SwaggerServer>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub base_path: Option<String>,
    #[serde(default)]
    pub schemes: Vec<String>,
    #[serde(default)]
    pub consumes: Vec<String>,
    /// Path template -> path item, in document order
    #[serde(default)]
    pub paths: IndexMap<String, IndexMap<String, Value>>,
}

impl SwaggerDocument {
    /// Returns true for OpenAPI 3 documents.
    #[must_use]
    pub const fn is_openapi3(&self) -> bool {
        self.openapi.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerInfo {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerServer {
    #[serde(default)]
    pub url: String,
}

/// One operation under a path
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerOperation {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Value>,
    #[serde(default)]
    pub request_body: Option<Value>,
    #[serde(default)]
    pub consumes: Vec<String>,
}

/// A parameter after `$ref` resolution
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerParameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "in", default)]
    pub location: String,
    #[serde(default)]
    pub example: Option<Value>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub schema: Option<Value>,
}

/// OpenAPI 3 `requestBody` after `$ref` resolution
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerRequestBody {
    #[serde(default)]
    pub content: IndexMap<String, SwaggerMediaType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaggerMediaType {
    #[serde(default)]
    pub example: Option<Value>,
    #[serde(default)]
    pub schema: Option<Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_paths_keep_document_order() {
        let doc: SwaggerDocument = serde_json::from_value(json!({
            "openapi": "3.0.0",
            "info": {"title": "Zoo"},
            "paths": {
                "/zebras": {"get": {}},
                "/ants": {"post": {}, "get": {}}
            }
        }))
        .unwrap();

        assert!(doc.is_openapi3());
        let paths: Vec<&str> = doc.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["/zebras", "/ants"]);
        let methods: Vec<&str> = doc.paths["/ants"].keys().map(String::as_str).collect();
        assert_eq!(methods, vec!["post", "get"]);
    }

    #[test]
    fn test_swagger2_fields() {
        let doc: SwaggerDocument = serde_json::from_value(json!({
            "swagger": "2.0",
            "host": "api.test",
            "basePath": "/v1",
            "schemes": ["http"]
        }))
        .unwrap();
        assert!(!doc.is_openapi3());
        assert_eq!(doc.host.as_deref(), Some("api.test"));
        assert_eq!(doc.base_path.as_deref(), Some("/v1"));
    }
}
