//! HTTP Archive (HAR 1.2) type definitions

#![allow(missing_docs)]

use serde::Deserialize;
use serde_json::Value;

use crate::import::common::{Shaped, lenient_opt_string, lenient_string};

/// Root structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarDocument {
    #[serde(default)]
    pub log: HarLog,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarLog {
    #[serde(default)]
    pub creator: Option<HarCreator>,
    /// Raw entries, read one at a time so a bad entry only degrades itself
    #[serde(default)]
    pub entries: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarCreator {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarEntry {
    #[serde(default)]
    pub request: Shaped<HarRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub method: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default)]
    pub headers: Shaped<Vec<HarNameValue>>,
    #[serde(default)]
    pub post_data: Shaped<Option<HarPostData>>,
}

/// Header or form parameter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarNameValue {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarPostData {
    #[serde(default, deserialize_with = "lenient_string")]
    pub mime_type: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub text: Option<String>,
    #[serde(default)]
    pub params: Shaped<Vec<HarNameValue>>,
}
