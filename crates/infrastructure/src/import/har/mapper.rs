//! HAR to canonical tree mapping
//!
//! One request per captured entry, all at the collection root.

use arbor_domain::{BodyType, Collection, CollectionItem, Header, Request};

use super::types::{HarDocument, HarEntry, HarPostData};
use crate::import::ImportResult;
use crate::import::common::{
    classify_mime, form_urlencoded, infer_auth, parse_method, query_params, request_name,
};
use crate::import::detect::ImportFormat;
use crate::import::warning::{ImportWarning, Warnings};

/// Default name when the capture names no creator.
pub const DEFAULT_COLLECTION_NAME: &str = "Imported HAR Collection";

/// Maps a HAR capture onto a new canonical collection.
#[must_use]
pub fn map_har_document(document: &HarDocument) -> ImportResult {
    let mut warnings = Warnings::new();
    let name = document
        .log
        .creator
        .as_ref()
        .and_then(|creator| creator.name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .map_or_else(|| DEFAULT_COLLECTION_NAME.to_string(), |name| format!("{name} Capture"));
    let mut collection = Collection::new(name);

    for (index, raw) in document.log.entries.iter().enumerate() {
        let trail = format!("log.entries[{index}]");
        let entry = serde_json::from_value::<HarEntry>(raw.clone()).unwrap_or_else(|e| {
            warnings.push(ImportWarning::warning(
                &trail,
                format!("Entry could not be read, imported with defaults: {e}"),
            ));
            HarEntry::default()
        });
        let request = map_entry(entry, &trail, &mut warnings);
        collection.add_item(CollectionItem::Request(request));
    }

    ImportResult {
        collection,
        format: ImportFormat::Har,
        warnings: warnings.into_vec(),
    }
}

fn map_entry(entry: HarEntry, trail: &str, warnings: &mut Warnings) -> Request {
    let source = entry.request.into_valid(trail, "request", warnings);
    let method = parse_method(&source.method, trail, warnings);
    let mut request = Request::new(request_name(method, &source.url));
    request.method = method;
    request.url.clone_from(&source.url);
    request.headers = source
        .headers
        .into_valid(trail, "headers", warnings)
        .iter()
        .map(|h| Header::new(&h.name, &h.value))
        .collect();
    request.params = query_params(&source.url).unwrap_or_else(|e| {
        warnings.push(ImportWarning::warning(
            trail,
            format!("URL '{}' could not be parsed, query params skipped: {e}", source.url),
        ));
        Vec::new()
    });
    if let Some(post) = source.post_data.into_valid(trail, "postData", warnings) {
        (request.body_type, request.body) = map_body(post, trail, warnings);
    }
    request.auth = infer_auth(&request.headers, trail, warnings);
    request
}

/// Non-empty text wins over form params.
fn map_body(post: HarPostData, trail: &str, warnings: &mut Warnings) -> (BodyType, String) {
    let params = post.params.into_valid(trail, "postData.params", warnings);
    if let Some(text) = post.text.filter(|text| !text.is_empty()) {
        let body_type = match classify_mime(&post.mime_type) {
            BodyType::Graphql | BodyType::Xml => BodyType::PlainText,
            other => other,
        };
        (body_type, text)
    } else if !params.is_empty() {
        let body = form_urlencoded(params.iter().map(|p| (p.name.as_str(), p.value.as_str())));
        (BodyType::FormUrlencoded, body)
    } else {
        (BodyType::None, String::new())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::import::common::Shaped;
    use arbor_domain::{AuthConfig, HttpMethod, QueryParam};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn map(value: &Value) -> ImportResult {
        map_har_document(&serde_json::from_value(value.clone()).unwrap())
    }

    fn capture() -> Value {
        json!({"log": {
            "creator": {"name": "Firefox"},
            "entries": [
                {"request": {
                    "method": "GET",
                    "url": "https://shop.test/items?page=2&sort=asc",
                    "headers": [
                        {"name": ":method", "value": "GET"},
                        {"name": "Authorization", "value": "Bearer t0k"}
                    ]
                }},
                {"request": {
                    "method": "POST",
                    "url": "https://shop.test/cart",
                    "postData": {"mimeType": "application/json; charset=utf-8", "text": "{\"sku\":1}"}
                }},
                {"request": {
                    "method": "POST",
                    "url": "https://shop.test/login",
                    "postData": {
                        "mimeType": "application/x-www-form-urlencoded",
                        "params": [{"name": "user", "value": "a b"}, {"name": "pw", "value": "x&y"}]
                    }
                }}
            ]
        }})
    }

    #[test]
    fn test_entries_map_to_flat_requests() {
        let result = map(&capture());
        assert_eq!(result.collection.name, "Firefox Capture");
        assert_eq!(result.collection.request_count(), 3);
        assert_eq!(result.collection.folder_count(), 0);

        let first = result.collection.requests().next().unwrap();
        assert_eq!(first.name, "GET /items");
        assert_eq!(
            first.params,
            vec![QueryParam::new("page", "2"), QueryParam::new("sort", "asc")]
        );
        assert_eq!(first.headers[0], Header::new(":method", "GET"));
        assert_eq!(first.auth, AuthConfig::bearer("t0k"));
        assert_eq!(first.body_type, BodyType::None);
    }

    #[test]
    fn test_bodies() {
        let result = map(&capture());
        let requests: Vec<&Request> = result.collection.requests().collect();
        assert_eq!(requests[1].body_type, BodyType::Json);
        assert_eq!(requests[1].body, "{\"sku\":1}");
        assert_eq!(requests[2].body_type, BodyType::FormUrlencoded);
        assert_eq!(requests[2].body, "user=a%20b&pw=x%26y");
    }

    #[test]
    fn test_xml_text_is_plain_text() {
        let post = HarPostData {
            mime_type: "application/xml".to_string(),
            text: Some("<a/>".to_string()),
            params: Shaped::default(),
        };
        let mut warnings = Warnings::new();
        assert_eq!(
            map_body(post, "e", &mut warnings),
            (BodyType::PlainText, "<a/>".to_string())
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_text_falls_back_to_params() {
        let result = map(&json!({"log": {"entries": [
            {"request": {
                "method": "POST",
                "url": "https://a.test/form",
                "postData": {
                    "mimeType": "application/x-www-form-urlencoded",
                    "text": "",
                    "params": [{"name": "u", "value": "a"}]
                }
            }}
        ]}}));
        let request = result.collection.requests().next().unwrap();
        assert_eq!(request.body_type, BodyType::FormUrlencoded);
        assert_eq!(request.body, "u=a");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unparseable_url_keeps_entry() {
        let result = map(&json!({"log": {"entries": [
            {"request": {"method": "GET", "url": "not a url?x=1"}},
            {"request": {"method": "DELETE", "url": "https://a.test/x/1"}}
        ]}}));
        assert_eq!(result.collection.name, DEFAULT_COLLECTION_NAME);
        let requests: Vec<&Request> = result.collection.requests().collect();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].params.is_empty());
        assert_eq!(requests[0].name, "not a url?x=1");
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert_eq!(requests[1].name, "DELETE /x/1");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_wrong_shaped_fields_degrade_to_defaults() {
        let result = map(&json!({"log": {"entries": [
            {"request": {"method": "GET", "url": "https://a.test/ok"}},
            {"request": {
                "method": "POST",
                "url": "https://a.test/bad",
                "headers": {"bad": "shape"},
                "postData": {"mimeType": "text/plain", "params": 7}
            }}
        ]}}));
        assert_eq!(result.collection.request_count(), 2);
        let bad = result.collection.requests().nth(1).unwrap();
        assert_eq!(bad.url, "https://a.test/bad");
        assert!(bad.headers.is_empty());
        assert_eq!(bad.body_type, BodyType::None);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings.iter().all(|w| !w.is_error()));
        assert!(result.warnings[0].message.contains("'headers'"));
        assert!(result.warnings[1].message.contains("'postData.params'"));
    }

    #[test]
    fn test_unreadable_entry_still_adds_a_request() {
        let result = map(&json!({"log": {"entries": [
            "not an entry",
            {"request": "not a request"},
            {"request": {"url": "https://a.test/"}}
        ]}}));
        assert_eq!(result.collection.request_count(), 3);
        assert!(result.warnings.iter().all(|w| !w.is_error()));
        let paths: Vec<&str> = result.warnings.iter().map(|w| w.path.as_str()).collect();
        assert!(paths.contains(&"log.entries[0]"));
        assert!(paths.contains(&"log.entries[1]"));
        assert!(!paths.contains(&"log.entries[2]"));
    }
}
