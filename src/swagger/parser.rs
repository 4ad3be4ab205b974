#![deny(missing_docs)]

//! # Specification Parser
//!
//! Transforms a raw Swagger 2.0 document into a typed [`SwaggerSpec`]
//! registry, optionally enriched with descriptions from a separate
//! documentation overlay.
//!
//! Error policy: a document without `definitions` or `basePath` cannot yield
//! a meaningful registry and fails fast. Every other anomaly (unresolvable
//! `$ref`, missing response schema, malformed parameter entry) degrades to
//! `None`/empty for the affected item so a few bad operations never abort
//! the whole parse.
//!
//! The input documents are read-only: descriptions from the overlay land on
//! the typed registry, never back on the caller's values.

use crate::error::{AppError, AppResult};
use crate::swagger::models::{
    HttpMethod, Model, ModelKind, ObjectModel, Operation, OperationParams, ParamSpec, Property,
    PropertySchema, SwaggerSpec, FILE_MODEL_NAME,
};
use crate::swagger::refs::{model_name_from_ref, resolve_model_ref};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;

const SUCCESS_RESPONSE_CODE: &str = "200";
const DELETE_PREFIX: &str = "delete";

/// Parses a decoded Swagger document into a registry.
///
/// `spec` must contain a `definitions` object and a `basePath` string;
/// anything else is tolerated. `docs`, when given, backfills `description`
/// fields on operations, parameters, models, and properties — it never
/// changes validation-relevant data.
pub fn parse_spec(spec: &Value, docs: Option<&Value>) -> AppResult<SwaggerSpec> {
    let definitions = spec
        .get("definitions")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            AppError::MalformedSpec("Swagger document missing required 'definitions' object".into())
        })?;
    let base_path = spec
        .get("basePath")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError::MalformedSpec("Swagger document missing required 'basePath' string".into())
        })?;

    let builder = SpecBuilder {
        definitions,
        base_path,
    };
    let mut models = builder.build_models();
    let mut operations = builder.build_operations(spec);

    if let Some(docs) = docs {
        enrich_operations(&mut operations, docs, base_path);
        enrich_models(&mut models, docs);
    }

    let model_operations = group_by_model(&operations);
    Ok(SwaggerSpec {
        models,
        operations,
        model_operations,
    })
}

/// Parses a Swagger document (and optional documentation overlay) from JSON
/// text.
pub fn parse_spec_json(spec: &str, docs: Option<&str>) -> AppResult<SwaggerSpec> {
    let spec: Value = serde_json::from_str(spec)
        .map_err(|e| AppError::General(format!("Failed to parse Swagger JSON: {}", e)))?;
    let docs: Option<Value> = docs
        .map(|d| {
            serde_json::from_str(d)
                .map_err(|e| AppError::General(format!("Failed to parse docs JSON: {}", e)))
        })
        .transpose()?;
    parse_spec(&spec, docs.as_ref())
}

/// Parses a Swagger document (and optional documentation overlay) from YAML
/// text.
pub fn parse_spec_yaml(spec: &str, docs: Option<&str>) -> AppResult<SwaggerSpec> {
    let spec: Value = serde_yaml::from_str(spec)
        .map_err(|e| AppError::General(format!("Failed to parse Swagger YAML: {}", e)))?;
    let docs: Option<Value> = docs
        .map(|d| {
            serde_yaml::from_str(d)
                .map_err(|e| AppError::General(format!("Failed to parse docs YAML: {}", e)))
        })
        .transpose()?;
    parse_spec(&spec, docs.as_ref())
}

struct SpecBuilder<'a> {
    definitions: &'a Map<String, Value>,
    base_path: &'a str,
}

impl SpecBuilder<'_> {
    fn build_models(&self) -> IndexMap<String, Model> {
        self.definitions
            .iter()
            .map(|(name, definition)| (name.clone(), build_model(definition)))
            .collect()
    }

    fn build_operations(&self, spec: &Value) -> IndexMap<String, Operation> {
        let mut operations = IndexMap::new();
        let Some(paths) = spec.get("paths").and_then(Value::as_object) else {
            return operations;
        };
        for (url, methods) in paths {
            let Some(methods) = methods.as_object() else {
                continue;
            };
            for (method_key, definition) in methods {
                let Some(definition) = definition.as_object() else {
                    continue;
                };
                // Entries without an operationId cannot be addressed by
                // callers and are skipped.
                let Some(operation_id) = definition.get("operationId").and_then(Value::as_str)
                else {
                    continue;
                };
                let method = HttpMethod::parse(method_key);
                let operation = Operation {
                    url: format!("{}{}", self.base_path, url),
                    model_name: self.model_name_for(&method, definition),
                    returns_multiple: returns_multiple(definition),
                    tags: string_list(definition.get("tags")),
                    parameters: definition
                        .get("parameters")
                        .and_then(Value::as_array)
                        .map(|params| partition_parameters(params)),
                    description: None,
                    method,
                };
                operations.insert(operation_id.to_string(), operation);
            }
        }
        operations
    }

    fn model_name_for(&self, method: &HttpMethod, definition: &Map<String, Value>) -> Option<String> {
        match method {
            HttpMethod::Get => self.model_name_from_responses(definition),
            HttpMethod::Post | HttpMethod::Put => self.model_name_for_body(definition),
            HttpMethod::Delete => self.model_name_from_delete(definition),
            HttpMethod::Other(_) => None,
        }
    }

    /// GET-style resolution via the success response schema: a direct
    /// `$ref`, the list shape (`properties.items.items.$ref`), or the file
    /// sentinel.
    fn model_name_from_responses(&self, definition: &Map<String, Value>) -> Option<String> {
        let schema = definition
            .get("responses")?
            .get(SUCCESS_RESPONSE_CODE)?
            .get("schema")?;
        if let Some(ref_str) = schema.get("$ref").and_then(Value::as_str) {
            return resolve_model_ref(self.definitions, ref_str);
        }
        if let Some(properties) = schema.get("properties") {
            let ref_str = properties.get("items")?.get("items")?.get("$ref")?.as_str()?;
            return resolve_model_ref(self.definitions, ref_str);
        }
        if schema.get("type").and_then(Value::as_str) == Some("file") {
            return Some(FILE_MODEL_NAME.to_string());
        }
        None
    }

    /// POST/PUT resolution: the `in: body` parameter's schema `$ref`, with
    /// the GET-style response resolution as fallback.
    fn model_name_for_body(&self, definition: &Map<String, Value>) -> Option<String> {
        let from_body = definition
            .get("parameters")
            .and_then(Value::as_array)
            .and_then(|params| {
                params
                    .iter()
                    .find(|param| param.get("in").and_then(Value::as_str) == Some("body"))
            })
            .and_then(|body| body.get("schema")?.get("$ref")?.as_str())
            .and_then(|ref_str| resolve_model_ref(self.definitions, ref_str));
        from_body.or_else(|| self.model_name_from_responses(definition))
    }

    /// DELETE resolution: strip the `delete` prefix from the operation id
    /// and accept the remainder only if it names a known definition.
    fn model_name_from_delete(&self, definition: &Map<String, Value>) -> Option<String> {
        let operation_id = definition.get("operationId").and_then(Value::as_str)?;
        let model_name = operation_id.strip_prefix(DELETE_PREFIX)?;
        if self.definitions.contains_key(model_name) {
            Some(model_name.to_string())
        } else {
            None
        }
    }
}

fn build_model(definition: &Value) -> Model {
    let kind = match definition.as_object() {
        Some(map) if map.contains_key("allOf") => ModelKind::Untyped,
        Some(map) => match map.get("type").and_then(Value::as_str) {
            Some("string") if map.contains_key("enum") => {
                ModelKind::Enum(string_list(map.get("enum")))
            }
            Some("object") => ModelKind::Object(build_object_model(map)),
            _ => ModelKind::Untyped,
        },
        None => ModelKind::Untyped,
    };
    Model {
        description: None,
        kind,
    }
}

fn build_object_model(map: &Map<String, Value>) -> ObjectModel {
    let required = string_list(map.get("required"));
    let mut properties = IndexMap::new();
    if let Some(declared) = map.get("properties").and_then(Value::as_object) {
        for (name, prop_definition) in declared {
            properties.insert(
                name.clone(),
                Property {
                    schema: build_property_schema(prop_definition),
                    required: required.iter().any(|field| field == name),
                    description: None,
                },
            );
        }
    }
    ObjectModel {
        required,
        properties,
    }
}

fn build_property_schema(definition: &Value) -> PropertySchema {
    let Some(map) = definition.as_object() else {
        return PropertySchema::Any;
    };
    match map.get("type").and_then(Value::as_str) {
        Some("object") | None => reference_schema(map),
        Some("array") => map
            .get("items")
            .map(build_property_schema)
            .map(|items| PropertySchema::Array(Box::new(items)))
            .unwrap_or(PropertySchema::Any),
        Some(other) => PropertySchema::Scalar(other.to_string()),
    }
}

fn reference_schema(map: &Map<String, Value>) -> PropertySchema {
    match map
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(model_name_from_ref)
    {
        Some(name) => PropertySchema::Reference(name),
        None => PropertySchema::Any,
    }
}

fn returns_multiple(definition: &Map<String, Value>) -> bool {
    definition
        .get("responses")
        .and_then(|responses| responses.get(SUCCESS_RESPONSE_CODE))
        .and_then(|response| response.get("schema"))
        .and_then(|schema| schema.get("properties"))
        .and_then(Value::as_object)
        .is_some_and(|properties| properties.contains_key("items"))
}

fn partition_parameters(params: &[Value]) -> OperationParams {
    let mut partitioned = OperationParams::default();
    for param in params {
        let Some(map) = param.as_object() else {
            continue;
        };
        let Some(name) = map.get("name").and_then(Value::as_str) else {
            continue;
        };
        let bucket = match map.get("in").and_then(Value::as_str) {
            Some("path") => &mut partitioned.path,
            Some("query") => &mut partitioned.query,
            // body is governed by the model; header/formData are out of scope
            _ => continue,
        };
        bucket.insert(
            name.to_string(),
            ParamSpec {
                ty: map
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("string")
                    .to_string(),
                required: map.get("required").and_then(Value::as_bool).unwrap_or(false),
                description: None,
            },
        );
    }
    partitioned
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn group_by_model(
    operations: &IndexMap<String, Operation>,
) -> IndexMap<Option<String>, IndexMap<String, Operation>> {
    let mut grouped: IndexMap<Option<String>, IndexMap<String, Operation>> = IndexMap::new();
    for (operation_id, operation) in operations {
        grouped
            .entry(operation.model_name.clone())
            .or_default()
            .insert(operation_id.clone(), operation.clone());
    }
    grouped
}

fn enrich_operations(
    operations: &mut IndexMap<String, Operation>,
    docs: &Value,
    base_path: &str,
) {
    for operation in operations.values_mut() {
        let relative_url = operation
            .url
            .strip_prefix(base_path)
            .unwrap_or(&operation.url);
        let operation_docs = docs
            .get("paths")
            .and_then(|paths| paths.get(relative_url))
            .and_then(|path| path.get(operation.method.as_str()));
        let description = operation_docs
            .and_then(|doc| doc.get("description"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let param_descriptions: HashMap<String, String> = operation_docs
            .and_then(|doc| doc.get("parameters"))
            .and_then(Value::as_array)
            .map(|params| {
                params
                    .iter()
                    .filter_map(|param| {
                        let name = param.get("name")?.as_str()?;
                        let desc = param
                            .get("description")
                            .and_then(Value::as_str)
                            .unwrap_or("");
                        Some((name.to_string(), desc.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        operation.description = Some(description);
        if let Some(parameters) = operation.parameters.as_mut() {
            for (name, spec) in parameters
                .path
                .iter_mut()
                .chain(parameters.query.iter_mut())
            {
                spec.description = Some(param_descriptions.get(name).cloned().unwrap_or_default());
            }
        }
    }
}

fn enrich_models(models: &mut IndexMap<String, Model>, docs: &Value) {
    let definitions = docs.get("definitions");
    for (name, model) in models.iter_mut() {
        let model_docs = definitions.and_then(|defs| defs.get(name));
        model.description = Some(
            model_docs
                .and_then(|doc| doc.get("description"))
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
        );
        if let ModelKind::Object(object) = &mut model.kind {
            for (prop_name, property) in object.properties.iter_mut() {
                let prop_docs = model_docs
                    .and_then(|doc| doc.get("properties"))
                    .and_then(|props| props.get(prop_name));
                property.description = Some(property_description(prop_docs).to_string());
            }
        }
    }
}

/// A property's overlay entry is either the description string itself or an
/// object carrying a `description` field.
fn property_description(doc: Option<&Value>) -> &str {
    match doc {
        Some(Value::String(text)) => text,
        Some(other) => other
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or(""),
        None => "",
    }
}
