//! Helpers shared by the format mappers.

use arbor_domain::{AuthConfig, BodyType, Header, HttpMethod, QueryParam, request::find_header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use url::Url;

use super::warning::{ImportWarning, Warnings};

/// Deserializes any scalar (string, number, bool, null) into a string.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .map(|value| value_to_string(&value))
        .unwrap_or_default())
}

/// Like [`lenient_string`], keeping `null`/absent as `None`.
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .filter(|value| !value.is_null())
        .map(|value| value_to_string(&value)))
}

/// Renders a JSON value as plain text: strings unquoted, `null` empty,
/// everything else as compact JSON.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A field that keeps a wrongly shaped value instead of failing the whole
/// record it belongs to.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Shaped<T> {
    /// The value had the expected shape
    Valid(T),
    /// Anything else, kept raw
    Malformed(Value),
}

impl<T: Default> Default for Shaped<T> {
    fn default() -> Self {
        Self::Valid(T::default())
    }
}

impl<T: Default> Shaped<T> {
    /// Returns the value, or the default plus a warning if it was malformed.
    pub fn into_valid(self, path: &str, field: &str, warnings: &mut Warnings) -> T {
        match self {
            Self::Valid(value) => value,
            Self::Malformed(_) => {
                warnings.push(ImportWarning::warning(
                    path,
                    format!("'{field}' has an unexpected shape and was ignored"),
                ));
                T::default()
            }
        }
    }
}

/// Parses an imported method name. Blank means GET; anything unsupported
/// degrades to GET with a warning.
pub fn parse_method(raw: &str, path: &str, warnings: &mut Warnings) -> HttpMethod {
    if raw.trim().is_empty() {
        return HttpMethod::Get;
    }
    raw.parse().unwrap_or_else(|_| {
        warnings.push(ImportWarning::warning(
            path,
            format!("Unsupported method '{raw}', using GET"),
        ));
        HttpMethod::Get
    })
}

/// Returns the token of an `Authorization: Bearer ...` header.
#[must_use]
pub fn bearer_token(headers: &[Header]) -> Option<String> {
    let value = &find_header(headers, "Authorization")?.value;
    strip_prefix_ignore_case(value, "bearer ").map(|token| token.trim().to_string())
}

/// Infers auth from a synthesized `Authorization` header: bearer tokens and
/// base64 `user:pass` basic credentials. Undecodable basic credentials
/// leave auth unset.
pub fn infer_auth(headers: &[Header], path: &str, warnings: &mut Warnings) -> AuthConfig {
    if let Some(token) = bearer_token(headers) {
        return AuthConfig::bearer(token);
    }
    let Some(encoded) = find_header(headers, "Authorization")
        .and_then(|header| strip_prefix_ignore_case(&header.value, "basic "))
    else {
        return AuthConfig::None;
    };

    match decode_basic(encoded.trim()) {
        Some((username, password)) => AuthConfig::basic(username, password),
        None => {
            warnings.push(ImportWarning::warning(
                path,
                "Authorization header has undecodable basic credentials; auth left unset",
            ));
            AuthConfig::None
        }
    }
}

fn decode_basic(encoded: &str) -> Option<(String, String)> {
    let bytes = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    Some(match decoded.split_once(':') {
        Some((user, pass)) => (user.to_string(), pass.to_string()),
        None => (decoded, String::new()),
    })
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}

/// Joins pairs as an `application/x-www-form-urlencoded` body.
pub fn form_urlencoded<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Joins pairs as `key: value` lines, the text form of a multipart body.
pub fn form_data_lines<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Classifies a MIME type by substring.
#[must_use]
pub fn classify_mime(mime: &str) -> BodyType {
    let mime = mime.to_ascii_lowercase();
    if mime.contains("form-urlencoded") {
        BodyType::FormUrlencoded
    } else if mime.contains("form-data") {
        BodyType::FormData
    } else if mime.contains("graphql") {
        BodyType::Graphql
    } else if mime.contains("json") {
        BodyType::Json
    } else if mime.contains("xml") {
        BodyType::Xml
    } else {
        BodyType::PlainText
    }
}

/// Picks json or plain-text by trying to parse `text`. Blank text does not
/// parse, so it is plain-text.
#[must_use]
pub fn sniff_body_type(text: &str) -> BodyType {
    if serde_json::from_str::<Value>(text).is_ok() {
        BodyType::Json
    } else {
        BodyType::PlainText
    }
}

/// Extracts the query parameters of an absolute URL.
///
/// # Errors
///
/// Returns the parse error if `url` is not an absolute URL.
pub fn query_params(url: &str) -> Result<Vec<QueryParam>, url::ParseError> {
    let parsed = Url::parse(url)?;
    Ok(parsed
        .query_pairs()
        .map(|(name, value)| QueryParam::new(name, value))
        .collect())
}

/// Names a request `"METHOD /path"`, or the full URL when it does not parse.
#[must_use]
pub fn request_name(method: HttpMethod, url: &str) -> String {
    Url::parse(url).map_or_else(
        |_| url.to_string(),
        |parsed| format!("{method} {}", parsed.path()),
    )
}
