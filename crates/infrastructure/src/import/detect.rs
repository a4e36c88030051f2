//! Format detection by structural signature.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Source format of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    /// Postman Collection v2.x
    Postman,
    /// Insomnia export (flat `resources[]`)
    Insomnia,
    /// Swagger 2 or OpenAPI 3
    Swagger,
    /// HTTP Archive
    Har,
    /// YAML text whose structure is resolved after parsing
    Yaml,
    /// Nothing matched
    Unknown,
}

impl ImportFormat {
    /// Returns a human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Postman => "Postman Collection",
            Self::Insomnia => "Insomnia Export",
            Self::Swagger => "Swagger/OpenAPI",
            Self::Har => "HAR",
            Self::Yaml => "YAML",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Detects the format of an input.
///
/// `value` is the parsed JSON document, or `None` when the text is not JSON.
/// Structural signatures are tried in priority order; the file extension is
/// only consulted when none of them match.
#[must_use]
pub fn detect_format(value: Option<&Value>, file_name: &str) -> ImportFormat {
    if let Some(format) = value.and_then(detect_structure) {
        return format;
    }
    if has_yaml_extension(file_name) {
        ImportFormat::Yaml
    } else {
        ImportFormat::Unknown
    }
}

/// Matches a parsed document against the known signatures, first hit wins.
#[must_use]
pub fn detect_structure(value: &Value) -> Option<ImportFormat> {
    if has_key(value, "info") && has_key(value, "item") {
        Some(ImportFormat::Postman)
    } else if value.get("_type").and_then(Value::as_str) == Some("export")
        && has_key(value, "resources")
    {
        Some(ImportFormat::Insomnia)
    } else if has_key(value, "swagger") || has_key(value, "openapi") {
        Some(ImportFormat::Swagger)
    } else if value.pointer("/log/entries").is_some_and(|entries| !entries.is_null()) {
        Some(ImportFormat::Har)
    } else {
        None
    }
}

/// A key that is present with an explicit `null` does not count.
fn has_key(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(|field| !field.is_null())
}

fn has_yaml_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn detect(value: &Value) -> ImportFormat {
        detect_format(Some(value), "input.json")
    }

    #[test]
    fn test_signatures() {
        assert_eq!(
            detect(&json!({"info": {"name": "X"}, "item": []})),
            ImportFormat::Postman
        );
        assert_eq!(
            detect(&json!({"_type": "export", "resources": []})),
            ImportFormat::Insomnia
        );
        assert_eq!(detect(&json!({"openapi": "3.0.0"})), ImportFormat::Swagger);
        assert_eq!(detect(&json!({"swagger": "2.0"})), ImportFormat::Swagger);
        assert_eq!(
            detect(&json!({"log": {"entries": []}})),
            ImportFormat::Har
        );
    }

    #[test]
    fn test_postman_wins_over_swagger() {
        let value = json!({"info": {}, "item": [], "openapi": "3.0.0"});
        assert_eq!(detect(&value), ImportFormat::Postman);
    }

    #[test]
    fn test_partial_signatures_are_unknown() {
        assert_eq!(detect(&json!({"info": {"name": "X"}})), ImportFormat::Unknown);
        assert_eq!(
            detect(&json!({"_type": "request", "resources": []})),
            ImportFormat::Unknown
        );
        assert_eq!(detect(&json!({"log": {}})), ImportFormat::Unknown);
        assert_eq!(detect(&json!([1, 2, 3])), ImportFormat::Unknown);
    }

    #[test]
    fn test_null_keys_do_not_match() {
        assert_eq!(detect(&json!({"info": null, "item": []})), ImportFormat::Unknown);
        assert_eq!(detect(&json!({"info": {}, "item": null})), ImportFormat::Unknown);
        assert_eq!(
            detect(&json!({"_type": "export", "resources": null})),
            ImportFormat::Unknown
        );
        assert_eq!(detect(&json!({"openapi": null})), ImportFormat::Unknown);
        assert_eq!(detect(&json!({"log": {"entries": null}})), ImportFormat::Unknown);
        assert_eq!(detect(&json!({"info": {}, "item": []})), ImportFormat::Postman);
    }

    #[test]
    fn test_yaml_extension_is_a_fallback() {
        assert_eq!(detect_format(None, "api.YAML"), ImportFormat::Yaml);
        assert_eq!(detect_format(None, "api.yml"), ImportFormat::Yaml);
        assert_eq!(detect_format(None, "api.txt"), ImportFormat::Unknown);
        assert_eq!(
            detect_format(Some(&json!({"swagger": "2.0"})), "api.yaml"),
            ImportFormat::Swagger
        );
    }

    #[test]
    fn test_detection_is_idempotent() {
        let value = json!({"log": {"entries": [{"request": {}}]}});
        let first = detect_format(Some(&value), "capture.har");
        let second = detect_format(Some(&value), "capture.har");
        assert_eq!(first, second);
    }
}
