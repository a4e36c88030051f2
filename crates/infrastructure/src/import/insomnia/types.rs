//! Insomnia export type definitions
//!
//! An export is a flat list of resources linked by `parentId`. Every
//! resource kind shares one struct; fields a kind does not use stay empty.

#![allow(missing_docs)]

use serde::Deserialize;
use serde_json::Value;

use crate::import::common::{lenient_opt_string, lenient_string};

/// Root of an Insomnia export (`_type: "export"`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsomniaExport {
    #[serde(rename = "__export_format", default)]
    pub export_format: Option<u32>,
    /// Kept raw so one malformed resource does not reject the export
    #[serde(default)]
    pub resources: Vec<Value>,
}

/// Resource kinds the importer reads
pub const KIND_REQUEST: &str = "request";
pub const KIND_GROUP: &str = "request_group";
pub const KIND_WORKSPACE: &str = "workspace";

/// One entry of `resources[]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsomniaResource {
    #[serde(rename = "_id", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "_type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub method: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default)]
    pub body: Option<InsomniaBody>,
    #[serde(default)]
    pub parameters: Vec<InsomniaPair>,
    #[serde(default)]
    pub headers: Vec<InsomniaPair>,
    #[serde(default)]
    pub authentication: Option<InsomniaAuth>,
}

/// Request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsomniaBody {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub text: Option<String>,
    #[serde(default)]
    pub params: Vec<InsomniaPair>,
}

/// Header, query parameter, or form field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsomniaPair {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Request authentication
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsomniaAuth {
    #[serde(rename = "type", default)]
    pub auth_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub token: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: String,
    #[serde(default)]
    pub disabled: bool,
}
