//! Postman to canonical tree mapping
//!
//! Postman allows folders at any depth, the canonical tree allows one level.
//! Folders below the first level are hoisted to collection level, named by
//! their ancestor chain and placed right after their parent.

use std::collections::HashMap;
use std::sync::LazyLock;

use arbor_domain::{
    AuthConfig, BodyType, Collection, CollectionItem, Folder, Header, QueryParam, Request,
};
use regex::{Captures, Regex};

use super::types::{
    PostmanAuth, PostmanBody, PostmanCollection, PostmanItem, PostmanRequest, PostmanUrl,
    PostmanUrlStructured,
};
use crate::import::common::{
    bearer_token, form_data_lines, form_urlencoded, parse_method, sniff_body_type,
};
use crate::import::config::ImportConfig;
use crate::import::detect::ImportFormat;
use crate::import::warning::{ImportWarning, Warnings};
use crate::import::ImportResult;

/// Default name for collections whose `info.name` is missing.
pub const DEFAULT_COLLECTION_NAME: &str = "Imported Postman Collection";

#[allow(clippy::unwrap_used)]
static PATH_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z_][A-Za-z0-9_.-]*)").unwrap());

/// Maps a Postman collection onto a new canonical collection.
#[must_use]
pub fn map_postman_collection(source: &PostmanCollection, config: &ImportConfig) -> ImportResult {
    let mut warnings = Warnings::new();
    let name = source
        .info
        .name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string());
    let mut collection = Collection::new(name);

    if !source.event.is_empty() {
        warnings.push(ImportWarning::info(
            "collection",
            "Collection-level scripts are not supported and were skipped",
        ));
    }

    for item in &source.item {
        if let Some(request) = &item.request {
            let request = map_request(
                &item.name,
                request.clone().into_request(),
                &item.name,
                &mut warnings,
            );
            collection.add_item(CollectionItem::Request(request));
        } else if item.is_folder() {
            let mut folders = Vec::new();
            flatten_folder(
                item,
                &item.name,
                &item.name,
                config,
                &mut folders,
                &mut warnings,
            );
            for folder in folders {
                collection.add_item(CollectionItem::Folder(folder));
            }
        } else {
            skip_empty_item(&item.name, &mut warnings);
        }
    }

    ImportResult {
        collection,
        format: ImportFormat::Postman,
        warnings: warnings.into_vec(),
    }
}

/// Pushes the folder for `item` and then, depth-first, one hoisted folder per
/// nested Postman folder.
fn flatten_folder(
    item: &PostmanItem,
    display_name: &str,
    trail: &str,
    config: &ImportConfig,
    out: &mut Vec<Folder>,
    warnings: &mut Warnings,
) {
    if !item.event.is_empty() {
        warnings.push(ImportWarning::info(
            trail,
            "Folder-level scripts are not supported and were skipped",
        ));
    }

    let index = out.len();
    out.push(Folder::new(display_name));
    let mut nested = Vec::new();

    for child in item.item.iter().flatten() {
        let child_trail = format!("{trail}/{}", child.name);
        if let Some(request) = &child.request {
            let request = map_request(
                &child.name,
                request.clone().into_request(),
                &child_trail,
                warnings,
            );
            out[index].items.push(request);
        } else if child.is_folder() {
            nested.push((child, child_trail));
        } else {
            skip_empty_item(&child_trail, warnings);
        }
    }

    for (child, child_trail) in nested {
        let hoisted_name = format!("{display_name}{}{}", config.flatten_separator, child.name);
        warnings.push(ImportWarning::info(
            &child_trail,
            format!("Nested folder flattened to '{hoisted_name}'"),
        ));
        flatten_folder(child, &hoisted_name, &child_trail, config, out, warnings);
    }
}

fn skip_empty_item(trail: &str, warnings: &mut Warnings) {
    warnings.push(ImportWarning::info(
        trail,
        "Item has no request or sub-items and was skipped",
    ));
}

/// Maps one Postman request. Source IDs are discarded.
fn map_request(
    name: &str,
    source: PostmanRequest,
    trail: &str,
    warnings: &mut Warnings,
) -> Request {
    let mut request = Request::new(name);
    request.method = parse_method(&source.method, trail, warnings);
    request.url = resolve_url(&source.url);
    request.params = source
        .url
        .query()
        .iter()
        .map(|q| QueryParam {
            name: q.key.clone(),
            value: q.value.clone(),
            enabled: !q.disabled,
        })
        .collect();
    request.headers = source
        .header
        .iter()
        .map(|h| Header {
            name: h.key.clone(),
            value: h.value.clone(),
            enabled: !h.disabled,
        })
        .collect();

    if let Some(body) = &source.body {
        let (body_type, text) = map_body(body, trail, warnings);
        request.body_type = body_type;
        request.body = text;
    }

    request.auth = map_auth(source.auth.as_ref(), trail, warnings);
    if let Some(token) = bearer_token(&request.headers) {
        request.auth = AuthConfig::bearer(token);
    }
    request
}

/// Returns the request URL, substituting `:name` path tokens in the
/// structured form. Unknown tokens stay as they are.
fn resolve_url(url: &PostmanUrl) -> String {
    match url {
        PostmanUrl::Empty => String::new(),
        PostmanUrl::Simple(raw) => raw.clone(),
        PostmanUrl::Structured(structured) => substitute_path_variables(structured),
    }
}

fn substitute_path_variables(url: &PostmanUrlStructured) -> String {
    if url.variable.is_empty() {
        return url.raw.clone();
    }
    let values: HashMap<&str, &str> = url
        .variable
        .iter()
        .filter_map(|v| {
            v.value
                .as_deref()
                .or(v.default.as_deref())
                .map(|value| (v.key.as_str(), value))
        })
        .collect();

    PATH_VARIABLE
        .replace_all(&url.raw, |caps: &Captures<'_>| {
            values
                .get(&caps[1])
                .map_or_else(|| caps[0].to_string(), |value| (*value).to_string())
        })
        .into_owned()
}

fn map_body(body: &PostmanBody, trail: &str, warnings: &mut Warnings) -> (BodyType, String) {
    match body.mode.as_str() {
        "raw" => {
            let raw = body.raw.clone().unwrap_or_default();
            let body_type = match body.raw_language().as_deref() {
                Some("json") => BodyType::Json,
                Some("xml") => BodyType::Xml,
                Some(_) => BodyType::PlainText,
                None => sniff_body_type(&raw),
            };
            (body_type, raw)
        }
        "urlencoded" => {
            let text = form_urlencoded(
                body.urlencoded
                    .iter()
                    .filter(|p| !p.disabled)
                    .map(|p| (p.key.as_str(), p.value.as_str())),
            );
            (BodyType::FormUrlencoded, text)
        }
        "formdata" => {
            let text = form_data_lines(
                body.formdata
                    .iter()
                    .filter(|p| !p.disabled)
                    .map(|p| (p.key.as_str(), p.value.as_str())),
            );
            (BodyType::FormData, text)
        }
        "graphql" => (BodyType::Graphql, render_graphql(body)),
        "" => (BodyType::None, String::new()),
        other => {
            warnings.push(ImportWarning::warning(
                format!("{trail}/body"),
                format!("Unsupported body mode '{other}' was skipped"),
            ));
            (BodyType::None, String::new())
        }
    }
}

/// Pretty-prints the `graphql` object, falling back to its bare query or
/// the raw text.
fn render_graphql(body: &PostmanBody) -> String {
    let Some(graphql) = body.graphql.as_ref() else {
        return body.raw.clone().unwrap_or_default();
    };
    serde_json::to_string_pretty(graphql).unwrap_or_else(|_| {
        graphql
            .get("query")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .or_else(|| body.raw.clone())
            .unwrap_or_default()
    })
}

fn map_auth(auth: Option<&PostmanAuth>, trail: &str, warnings: &mut Warnings) -> AuthConfig {
    let Some(auth) = auth else {
        return AuthConfig::None;
    };
    match auth.auth_type.as_str() {
        "bearer" => {
            AuthConfig::bearer(PostmanAuth::param(&auth.bearer, "token").unwrap_or_default())
        }
        "basic" => AuthConfig::basic(
            PostmanAuth::param(&auth.basic, "username").unwrap_or_default(),
            PostmanAuth::param(&auth.basic, "password").unwrap_or_default(),
        ),
        "" | "noauth" | "inherit" => AuthConfig::None,
        other => {
            warnings.push(ImportWarning::warning(
                format!("{trail}/auth"),
                format!("Authentication type '{other}' is not supported and was skipped"),
            ));
            AuthConfig::None
        }
    }
}
