//! Insomnia to canonical tree mapping
//!
//! Two passes over the flat resource list. Pass one turns every request
//! group into a folder with a fresh ID, pass two files each request under
//! the folder its `parentId` names, or at the collection root. Only that one
//! `parentId` hop is followed, so groups nested in groups come out as
//! sibling folders.

use std::collections::HashMap;

use arbor_domain::{
    AuthConfig, BodyType, Collection, CollectionItem, Folder, Header, QueryParam, Request,
};

use super::types::{
    InsomniaAuth, InsomniaBody, InsomniaExport, InsomniaResource, KIND_GROUP, KIND_REQUEST,
    KIND_WORKSPACE,
};
use crate::import::ImportResult;
use crate::import::common::{
    bearer_token, classify_mime, form_data_lines, form_urlencoded, parse_method,
};
use crate::import::detect::ImportFormat;
use crate::import::warning::{ImportWarning, Warnings};

/// Default name when the export carries no workspace resource.
pub const DEFAULT_COLLECTION_NAME: &str = "Imported Insomnia Collection";

/// Maps an Insomnia export onto a new canonical collection.
#[must_use]
pub fn map_insomnia_export(export: &InsomniaExport) -> ImportResult {
    let mut warnings = Warnings::new();
    let resources = parse_resources(export, &mut warnings);

    let name = resources
        .iter()
        .find(|r| r.kind == KIND_WORKSPACE && !r.name.trim().is_empty())
        .map_or_else(|| DEFAULT_COLLECTION_NAME.to_string(), |r| r.name.clone());
    let mut collection = Collection::new(name);

    // Pass 1: groups become folders; remember source ID -> item index.
    let mut folder_index: HashMap<&str, usize> = HashMap::new();
    let mut pending = Vec::new();
    for resource in &resources {
        match resource.kind.as_str() {
            KIND_GROUP => {
                folder_index.insert(resource.id.as_str(), collection.items.len());
                collection.add_item(CollectionItem::Folder(Folder::new(group_name(resource))));
            }
            KIND_REQUEST => pending.push(resource),
            _ => {}
        }
    }

    // Pass 2: place requests one parentId hop deep.
    for resource in pending {
        let request = map_request(resource, &mut warnings);
        let folder = resource
            .parent_id
            .as_deref()
            .and_then(|parent| folder_index.get(parent))
            .and_then(|&index| match &mut collection.items[index] {
                CollectionItem::Folder(folder) => Some(folder),
                CollectionItem::Request(_) => None,
            });
        match folder {
            Some(folder) => folder.items.push(request),
            None => collection.add_item(CollectionItem::Request(request)),
        }
    }
    collection.restamp_paths();

    ImportResult {
        collection,
        format: ImportFormat::Insomnia,
        warnings: warnings.into_vec(),
    }
}

fn parse_resources(export: &InsomniaExport, warnings: &mut Warnings) -> Vec<InsomniaResource> {
    export
        .resources
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            serde_json::from_value(value.clone())
                .map_err(|e| {
                    warnings.push(ImportWarning::error(
                        format!("resources[{index}]"),
                        format!("Resource could not be read and was skipped: {e}"),
                    ));
                })
                .ok()
        })
        .collect()
}

fn group_name(resource: &InsomniaResource) -> String {
    if resource.name.trim().is_empty() {
        "Folder".to_string()
    } else {
        resource.name.clone()
    }
}

fn map_request(resource: &InsomniaResource, warnings: &mut Warnings) -> Request {
    let trail = &resource.name;
    let mut request = Request::new(&resource.name);
    request.method = parse_method(&resource.method, trail, warnings);
    request.url.clone_from(&resource.url);
    request.params = resource
        .parameters
        .iter()
        .map(|p| QueryParam {
            name: p.name.clone(),
            value: p.value.clone(),
            enabled: !p.disabled,
        })
        .collect();
    request.headers = resource
        .headers
        .iter()
        .map(|h| Header {
            name: h.name.clone(),
            value: h.value.clone(),
            enabled: !h.disabled,
        })
        .collect();

    if let Some(body) = &resource.body {
        let (body_type, text) = map_body(body);
        request.body_type = body_type;
        request.body = text;
    }

    request.auth = map_auth(resource.authentication.as_ref(), trail, warnings);
    if let Some(token) = bearer_token(&request.headers) {
        request.auth = AuthConfig::bearer(token);
    }
    request
}

fn map_body(body: &InsomniaBody) -> (BodyType, String) {
    let Some(mime) = body.mime_type.as_deref().filter(|m| !m.is_empty()) else {
        return (BodyType::None, body.text.clone().unwrap_or_default());
    };
    let body_type = classify_mime(mime);
    if let Some(text) = &body.text {
        return (body_type, text.clone());
    }

    let fields = body
        .params
        .iter()
        .filter(|p| !p.disabled)
        .map(|p| (p.name.as_str(), p.value.as_str()));
    let text = match body_type {
        BodyType::FormUrlencoded => form_urlencoded(fields),
        BodyType::FormData => form_data_lines(fields),
        _ => String::new(),
    };
    (body_type, text)
}

fn map_auth(auth: Option<&InsomniaAuth>, trail: &str, warnings: &mut Warnings) -> AuthConfig {
    let Some(auth) = auth.filter(|a| !a.disabled) else {
        return AuthConfig::None;
    };
    match auth.auth_type.as_str() {
        "bearer" => AuthConfig::bearer(&auth.token),
        "basic" => AuthConfig::basic(&auth.username, &auth.password),
        "" | "none" => AuthConfig::None,
        other => {
            warnings.push(ImportWarning::warning(
                trail,
                format!("Authentication type '{other}' is not supported and was skipped"),
            ));
            AuthConfig::None
        }
    }
}
