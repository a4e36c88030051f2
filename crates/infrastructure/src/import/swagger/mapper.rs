//! Swagger/OpenAPI to canonical tree mapping
//!
//! Every (path, method) operation becomes one request at the collection
//! root, in document order. No folders are produced.

use arbor_domain::{BodyType, Collection, CollectionItem, Header, HttpMethod, QueryParam, Request};
use arbor_domain::request::find_header;
use serde_json::Value;

use super::schema::{RefResolver, render_example};
use super::types::{
    OPERATION_METHODS, SwaggerDocument, SwaggerMediaType, SwaggerOperation, SwaggerParameter,
    SwaggerRequestBody,
};
use crate::import::ImportResult;
use crate::import::common::{classify_mime, infer_auth, value_to_string};
use crate::import::detect::ImportFormat;
use crate::import::warning::{ImportWarning, Warnings};

/// Default name when `info.title` is missing.
pub const DEFAULT_COLLECTION_NAME: &str = "Imported API";

/// Maps a Swagger 2 or OpenAPI 3 document onto a new canonical collection.
///
/// `root` is the raw document the typed one was read from; `$ref`s are
/// resolved against it.
#[must_use]
pub fn map_swagger_document(document: &SwaggerDocument, root: &Value) -> ImportResult {
    let mut warnings = Warnings::new();
    let resolver = RefResolver::new(root);
    let name = document
        .info
        .title
        .clone()
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string());
    let mut collection = Collection::new(name);
    let base_url = base_url(document);

    for (path, item) in &document.paths {
        let shared = item
            .get("parameters")
            .and_then(Value::as_array)
            .map(|raw| parse_parameters(raw, &resolver, path, &mut warnings))
            .unwrap_or_default();

        for (key, raw_operation) in item {
            let key = key.to_ascii_lowercase();
            if !OPERATION_METHODS.contains(&key.as_str()) {
                continue;
            }
            let trail = format!("{} {path}", key.to_ascii_uppercase());
            let operation: SwaggerOperation = match serde_json::from_value(raw_operation.clone()) {
                Ok(operation) => operation,
                Err(e) => {
                    warnings.push(ImportWarning::error(
                        &trail,
                        format!("Operation could not be read and was skipped: {e}"),
                    ));
                    continue;
                }
            };
            let method = key.parse().unwrap_or(HttpMethod::Get);
            let context = OperationContext {
                document,
                resolver: &resolver,
                base_url: &base_url,
                path,
                method,
                trail: &trail,
            };
            let request = context.map_operation(&operation, &shared, &mut warnings);
            collection.add_item(CollectionItem::Request(request));
        }
    }

    ImportResult {
        collection,
        format: ImportFormat::Swagger,
        warnings: warnings.into_vec(),
    }
}

/// OpenAPI 3 uses `servers[0].url`; Swagger 2 builds
/// `{scheme}://{host}{basePath}`, or just `basePath` without a host.
fn base_url(document: &SwaggerDocument) -> String {
    if document.is_openapi3() {
        return document
            .servers
            .first()
            .map(|server| server.url.clone())
            .unwrap_or_default();
    }
    let base_path = document.base_path.clone().unwrap_or_default();
    match document.host.as_deref().filter(|host| !host.is_empty()) {
        Some(host) => {
            let scheme = document.schemes.first().map_or("https", String::as_str);
            format!("{scheme}://{host}{base_path}")
        }
        None => base_path,
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{path}", base.trim_end_matches('/'))
    } else {
        format!("{base}{path}")
    }
}

fn parse_parameters(
    raw: &[Value],
    resolver: &RefResolver<'_>,
    trail: &str,
    warnings: &mut Warnings,
) -> Vec<SwaggerParameter> {
    raw.iter()
        .filter_map(|value| {
            serde_json::from_value(resolver.resolve(value).clone())
                .map_err(|e| {
                    warnings.push(ImportWarning::warning(
                        trail,
                        format!("Parameter could not be read and was skipped: {e}"),
                    ));
                })
                .ok()
        })
        .collect()
}

/// Operation parameters override path-level ones with the same name and
/// location.
fn merge_parameters(
    shared: &[SwaggerParameter],
    own: Vec<SwaggerParameter>,
) -> Vec<SwaggerParameter> {
    let mut merged = shared.to_vec();
    for parameter in own {
        match merged
            .iter_mut()
            .find(|p| p.name == parameter.name && p.location == parameter.location)
        {
            Some(existing) => *existing = parameter,
            None => merged.push(parameter),
        }
    }
    merged
}

fn parameter_value(parameter: &SwaggerParameter) -> String {
    let schema = parameter.schema.as_ref();
    parameter
        .example
        .as_ref()
        .or(parameter.default.as_ref())
        .or_else(|| schema.and_then(|s| s.get("example")))
        .or_else(|| schema.and_then(|s| s.get("default")))
        .map(value_to_string)
        .unwrap_or_default()
}

struct OperationContext<'a> {
    document: &'a SwaggerDocument,
    resolver: &'a RefResolver<'a>,
    base_url: &'a str,
    path: &'a str,
    method: HttpMethod,
    trail: &'a str,
}

impl OperationContext<'_> {
    fn map_operation(
        &self,
        operation: &SwaggerOperation,
        shared: &[SwaggerParameter],
        warnings: &mut Warnings,
    ) -> Request {
        let name = operation
            .summary
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| operation.operation_id.clone().filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| format!("{} {}", self.method, self.path));
        let mut request = Request::new(name);
        request.method = self.method;
        request.url = join_url(self.base_url, self.path);

        let own = parse_parameters(&operation.parameters, self.resolver, self.trail, warnings);
        let parameters = merge_parameters(shared, own);
        let mut body_parameter = None;
        let mut has_form_fields = false;
        for parameter in &parameters {
            let value = parameter_value(parameter);
            match parameter.location.as_str() {
                "query" => request.params.push(QueryParam {
                    name: parameter.name.clone(),
                    value,
                    enabled: !parameter.deprecated,
                }),
                "header" => request.headers.push(Header {
                    name: parameter.name.clone(),
                    value,
                    enabled: !parameter.deprecated,
                }),
                "body" => body_parameter = Some(parameter),
                "formData" => has_form_fields = true,
                _ => {}
            }
        }

        if self.document.is_openapi3() {
            if let Some(raw) = &operation.request_body {
                self.apply_request_body(&mut request, raw, warnings);
            }
        } else {
            let consumes = if operation.consumes.is_empty() {
                &self.document.consumes
            } else {
                &operation.consumes
            };
            if let Some(parameter) = body_parameter {
                let content_type = consumes.first().map_or("application/json", String::as_str);
                let media = SwaggerMediaType {
                    example: parameter.example.clone(),
                    schema: parameter.schema.clone(),
                };
                self.apply_media(&mut request, content_type, &media);
            } else if has_form_fields {
                let multipart = consumes.iter().any(|c| c.contains("multipart"));
                let content_type = if multipart {
                    "multipart/form-data"
                } else {
                    "application/x-www-form-urlencoded"
                };
                self.apply_media(&mut request, content_type, &SwaggerMediaType::default());
            }
        }

        request.auth = infer_auth(&request.headers, self.trail, warnings);
        request
    }

    fn apply_request_body(&self, request: &mut Request, raw: &Value, warnings: &mut Warnings) {
        let body: SwaggerRequestBody = match serde_json::from_value(self.resolver.resolve(raw).clone())
        {
            Ok(body) => body,
            Err(e) => {
                warnings.push(ImportWarning::warning(
                    self.trail,
                    format!("Request body could not be read and was skipped: {e}"),
                ));
                return;
            }
        };
        if let Some((content_type, media)) = body.content.first() {
            self.apply_media(request, content_type, media);
        }
    }

    fn apply_media(&self, request: &mut Request, content_type: &str, media: &SwaggerMediaType) {
        if find_header(&request.headers, "Content-Type").is_none() {
            request.headers.push(Header::new("Content-Type", content_type));
        }
        let example = || media.example.as_ref().map(render_example);
        let (body_type, body) = match classify_mime(content_type) {
            BodyType::Json => (
                BodyType::Json,
                example().or_else(|| {
                    media
                        .schema
                        .as_ref()
                        .and_then(|schema| self.resolver.example_body(schema))
                }),
            ),
            form @ (BodyType::FormUrlencoded | BodyType::FormData) => (form, None),
            BodyType::Xml => (BodyType::Xml, example()),
            _ => (BodyType::PlainText, example()),
        };
        request.body_type = body_type;
        request.body = body.unwrap_or_default();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use arbor_domain::AuthConfig;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(root: &Value) -> ImportResult {
        let document: SwaggerDocument = serde_json::from_value(root.clone()).unwrap();
        map_swagger_document(&document, root)
    }

    fn requests(result: &ImportResult) -> Vec<&Request> {
        result.collection.requests().collect()
    }

    fn openapi() -> Value {
        json!({
            "openapi": "3.0.1",
            "info": {"title": "Pets"},
            "servers": [{"url": "https://pets.test/v1/"}],
            "paths": {
                "/pets": {
                    "parameters": [
                        {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 20}},
                        {"name": "X-Tenant", "in": "header", "example": "acme"}
                    ],
                    "get": {
                        "summary": "List pets",
                        "parameters": [
                            {"name": "limit", "in": "query", "example": 5},
                            {"name": "legacy", "in": "query", "deprecated": true},
                            {"$ref": "#/components/parameters/Auth"}
                        ]
                    },
                    "post": {
                        "operationId": "createPet",
                        "requestBody": {"$ref": "#/components/requestBodies/Pet"}
                    }
                },
                "/pets/{id}": {
                    "delete": {},
                    "x-extension": {"ignored": true}
                }
            },
            "components": {
                "parameters": {
                    "Auth": {"name": "Authorization", "in": "header", "example": "Bearer tok"}
                },
                "requestBodies": {
                    "Pet": {"content": {"application/json": {
                        "schema": {"$ref": "#/components/schemas/Pet"}
                    }}}
                },
                "schemas": {
                    "Pet": {"type": "object", "properties": {
                        "name": {"type": "string"},
                        "vaccinated": {"type": "boolean"}
                    }}
                }
            }
        })
    }

    #[test]
    fn test_one_request_per_operation_in_order() {
        let result = map(&openapi());
        assert_eq!(result.collection.name, "Pets");
        assert_eq!(result.collection.folder_count(), 0);

        let names: Vec<&str> = requests(&result).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["List pets", "createPet", "DELETE /pets/{id}"]);

        let urls: Vec<&str> = requests(&result).iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://pets.test/v1/pets",
                "https://pets.test/v1/pets",
                "https://pets.test/v1/pets/{id}"
            ]
        );
    }

    #[test]
    fn test_parameters_merge_and_auth() {
        let result = map(&openapi());
        let list = requests(&result)[0];
        assert_eq!(
            list.params,
            vec![
                QueryParam::new("limit", "5"),
                QueryParam::disabled("legacy", "")
            ]
        );
        assert_eq!(
            list.headers,
            vec![
                Header::new("X-Tenant", "acme"),
                Header::new("Authorization", "Bearer tok")
            ]
        );
        assert_eq!(list.auth, AuthConfig::bearer("tok"));
    }

    #[test]
    fn test_json_body_is_synthesized_from_referenced_schema() {
        let result = map(&openapi());
        let create = requests(&result)[1];
        assert_eq!(create.method, HttpMethod::Post);
        assert_eq!(create.body_type, BodyType::Json);
        assert_eq!(
            serde_json::from_str::<Value>(&create.body).unwrap(),
            json!({"name": "string", "vaccinated": false})
        );
        // Path-level parameters still apply.
        assert_eq!(
            create.headers,
            vec![
                Header::new("X-Tenant", "acme"),
                Header::new("Content-Type", "application/json")
            ]
        );
        assert_eq!(create.params, vec![QueryParam::new("limit", "20")]);
    }

    #[test]
    fn test_media_example_is_used_verbatim() {
        let root = json!({
            "openapi": "3.0.0",
            "paths": {"/notes": {"put": {"requestBody": {"content": {
                "text/plain": {"example": "hello"},
                "application/json": {"example": {"ignored": true}}
            }}}}}
        });
        let result = map(&root);
        let request = requests(&result)[0];
        assert_eq!(request.body_type, BodyType::PlainText);
        assert_eq!(request.body, "hello");
        assert_eq!(result.collection.name, DEFAULT_COLLECTION_NAME);
        assert_eq!(request.url, "/notes");
    }

    #[test]
    fn test_swagger2_base_url_and_bodies() {
        let root = json!({
            "swagger": "2.0",
            "info": {"title": "Legacy"},
            "host": "legacy.test",
            "basePath": "/api",
            "schemes": ["http", "https"],
            "paths": {
                "/users": {
                    "post": {"parameters": [{"name": "user", "in": "body", "schema": {
                        "type": "object", "properties": {"id": {"type": "integer", "example": 3}}
                    }}]}
                },
                "/upload": {
                    "post": {
                        "consumes": ["multipart/form-data"],
                        "parameters": [{"name": "file", "in": "formData", "type": "file"}]
                    },
                    "put": {"parameters": [{"name": "name", "in": "formData", "type": "string"}]}
                }
            }
        });
        let result = map(&root);
        let all = requests(&result);
        assert_eq!(all[0].url, "http://legacy.test/api/users");
        assert_eq!(all[0].body_type, BodyType::Json);
        assert_eq!(
            serde_json::from_str::<Value>(&all[0].body).unwrap(),
            json!({"id": 3})
        );
        assert_eq!(all[1].body_type, BodyType::FormData);
        assert_eq!(all[1].body, "");
        assert_eq!(all[2].body_type, BodyType::FormUrlencoded);
    }

    #[test]
    fn test_swagger2_without_host_uses_base_path() {
        let root = json!({"swagger": "2.0", "basePath": "/v2", "paths": {"/ping": {"get": {}}}});
        let result = map(&root);
        assert_eq!(requests(&result)[0].url, "/v2/ping");
    }

    #[test]
    fn test_basic_auth_inference() {
        let encoded = STANDARD.encode("bob:pw");
        let root = json!({"openapi": "3.0.0", "paths": {
            "/a": {"get": {"parameters": [
                {"name": "Authorization", "in": "header", "example": format!("Basic {encoded}")}
            ]}},
            "/b": {"get": {"parameters": [
                {"name": "Authorization", "in": "header", "example": "Basic %%%"}
            ]}}
        }});
        let result = map(&root);
        let all = requests(&result);
        assert_eq!(all[0].auth, AuthConfig::basic("bob", "pw"));
        assert_eq!(all[1].auth, AuthConfig::None);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_bad_operation_is_skipped() {
        let root = json!({"openapi": "3.0.0", "paths": {"/a": {
            "get": {"parameters": "oops"},
            "post": {}
        }}});
        let result = map(&root);
        assert_eq!(result.collection.request_count(), 1);
        assert_eq!(requests(&result)[0].method, HttpMethod::Post);
        assert!(result.warnings[0].is_error());
    }
}
