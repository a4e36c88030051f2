//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON: 2-space indentation and a
/// trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Same as [`to_json_stable`], as bytes for direct file writing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    Ok(to_json_stable(value)?.into_bytes())
}

/// Deserializes JSON from a string, pretty-printed or minified.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use arbor_domain::{Collection, CollectionItem, Folder, Request};
    use pretty_assertions::assert_eq;

    fn forest() -> Vec<Collection> {
        let mut collection = Collection::new("Shop");
        let mut folder = Folder::new("Cart");
        folder.items.push(Request::get("Add", "https://shop.test/cart"));
        collection.add_item(CollectionItem::Folder(folder));
        vec![collection]
    }

    #[test]
    fn test_two_space_indent_and_trailing_newline() {
        let json = to_json_stable(&forest()).unwrap();
        assert!(json.ends_with("]\n"));
        assert!(json.contains("\n  {\n    \"id\""));
    }

    #[test]
    fn test_same_forest_same_bytes() {
        let forest = forest();
        assert_eq!(
            to_json_stable_bytes(&forest).unwrap(),
            to_json_stable_bytes(&forest).unwrap()
        );
    }

    #[test]
    fn test_roundtrip_keeps_paths() {
        let original = forest();
        let json = to_json_stable(&original).unwrap();
        let restored: Vec<Collection> = from_json(&json).unwrap();
        assert_eq!(original, restored);
        assert!(restored[0].path_violations().is_empty());
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        let result: Result<Vec<Collection>, _> = from_json(r#"{"id": "x"}"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
