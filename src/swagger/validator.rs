#![deny(missing_docs)]

//! # Schema Validator
//!
//! Validates request bodies and URL parameter maps against a parsed
//! [`SwaggerSpec`] registry.
//!
//! Two outcomes, never conflated: misuse of the validator itself (empty or
//! unknown operation name, non-object payload) raises
//! [`AppError::IllegalArgument`], while data that merely fails to conform to
//! the schema is returned as [`ValidationOutcome::Invalid`] carrying a
//! path-addressed report.

use crate::error::{AppError, AppResult};
use crate::swagger::models::{ModelKind, ObjectModel, Operation, ParamSpec, PropertySchema, SwaggerSpec};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// A single type-mismatch finding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeMismatch {
    /// Dotted/bracketed path to the offending value (e.g. `objects[1].id`).
    pub path: String,
    /// The type the schema declares at that path.
    pub expected_type: String,
    /// The offending value, verbatim.
    pub actually_value: Value,
}

/// Structured validation findings: required fields that are absent (or
/// explicitly null) and values of the wrong type.
///
/// Serializes with empty lists omitted, matching the report shape consumed
/// by calling modules.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationReport {
    /// Paths of required fields that are missing or null.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Type-mismatch findings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_type: Vec<TypeMismatch>,
}

impl ValidationReport {
    /// True when no findings were recorded.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.invalid_type.is_empty()
    }

    fn into_outcome(self) -> ValidationOutcome {
        if self.is_empty() {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid(self)
        }
    }

    fn push_mismatch(&mut self, path: &str, expected_type: &str, value: &Value) {
        self.invalid_type.push(TypeMismatch {
            path: path.to_string(),
            expected_type: expected_type.to_string(),
            actually_value: value.clone(),
        });
    }
}

/// Result of a validation call.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The data conforms to the schema.
    Valid,
    /// The data does not conform; the report lists every finding.
    Invalid(ValidationReport),
}

impl ValidationOutcome {
    /// True for [`ValidationOutcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Borrows the report, if any.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(report) => Some(report),
        }
    }

    /// Consumes the outcome, yielding the report for invalid data.
    pub fn into_report(self) -> Option<ValidationReport> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(report) => Some(report),
        }
    }
}

enum ParamKind {
    Path,
    Query,
}

/// Validates payloads and URL parameters against a registry.
///
/// Stateless across calls: the validator only borrows the registry, so one
/// instance can serve any number of validations, and registries can be
/// shared between validators.
pub struct SwaggerValidator<'a> {
    spec: &'a SwaggerSpec,
}

impl<'a> SwaggerValidator<'a> {
    /// Creates a validator over a parsed registry.
    pub fn new(spec: &'a SwaggerSpec) -> Self {
        SwaggerValidator { spec }
    }

    /// Validates a request body against the model governing the named
    /// operation.
    ///
    /// `None` (or JSON null) data is treated as an empty object, so required
    /// top-level fields are still reported.
    pub fn validate_data(
        &self,
        operation_name: &str,
        data: Option<&Value>,
    ) -> AppResult<ValidationOutcome> {
        let operation = self.lookup_operation(operation_name)?;
        object_argument(data, "data")?;

        let model_name = operation.model_name.as_deref().ok_or_else(|| {
            AppError::IllegalArgument(format!(
                "Operation '{}' has no request model",
                operation_name
            ))
        })?;
        let model = self.spec.models.get(model_name).ok_or_else(|| {
            AppError::IllegalArgument(format!(
                "Operation '{}' references unknown model '{}'",
                operation_name, model_name
            ))
        })?;

        // Absent/null data validates as an empty object so required
        // top-level fields are still reported.
        let empty = Value::Object(Map::new());
        let root = match data {
            Some(value @ Value::Object(_)) => value,
            _ => &empty,
        };
        let mut report = ValidationReport::default();
        self.check_model(&mut report, &model.kind, root, "");
        Ok(report.into_outcome())
    }

    /// Validates path parameters for the named operation.
    pub fn validate_path_params(
        &self,
        operation_name: &str,
        params: Option<&Value>,
    ) -> AppResult<ValidationOutcome> {
        self.validate_url_params(operation_name, params, ParamKind::Path)
    }

    /// Validates query parameters for the named operation.
    pub fn validate_query_params(
        &self,
        operation_name: &str,
        params: Option<&Value>,
    ) -> AppResult<ValidationOutcome> {
        self.validate_url_params(operation_name, params, ParamKind::Query)
    }

    fn validate_url_params(
        &self,
        operation_name: &str,
        params: Option<&Value>,
        kind: ParamKind,
    ) -> AppResult<ValidationOutcome> {
        let operation = self.lookup_operation(operation_name)?;
        let params = object_argument(params, "params")?;

        let Some(declared) = operation.parameters.as_ref() else {
            // No parameter schema at all: nothing to violate.
            return Ok(ValidationOutcome::Valid);
        };
        let schema = match kind {
            ParamKind::Path => &declared.path,
            ParamKind::Query => &declared.query,
        };

        let empty = Map::new();
        let params = params.unwrap_or(&empty);
        let mut report = ValidationReport::default();
        check_flat_params(&mut report, schema, params);
        Ok(report.into_outcome())
    }

    fn lookup_operation(&self, operation_name: &str) -> AppResult<&'a Operation> {
        if operation_name.is_empty() {
            return Err(AppError::IllegalArgument(
                "The operation_name parameter must be a non-empty string".into(),
            ));
        }
        self.spec.operations.get(operation_name).ok_or_else(|| {
            AppError::IllegalArgument(format!("Unknown operation '{}'", operation_name))
        })
    }

    fn check_model(&self, report: &mut ValidationReport, kind: &ModelKind, data: &Value, path: &str) {
        match kind {
            ModelKind::Enum(values) => check_enum(report, values, data, path),
            ModelKind::Object(object) => self.check_object(report, object, data, path),
            // Scalar aliases and allOf composites carry nothing to check.
            ModelKind::Untyped => {}
        }
    }

    fn check_object(
        &self,
        report: &mut ValidationReport,
        object: &ObjectModel,
        data: &Value,
        path: &str,
    ) {
        if data.is_null() {
            // Optional-by-absence: required-ness is the parent's concern.
            return;
        }
        let Some(map) = data.as_object() else {
            report.push_mismatch(path, "object", data);
            return;
        };

        for field in &object.required {
            let missing = match map.get(field) {
                None => true,
                Some(value) => value.is_null(),
            };
            if missing {
                report.required.push(join_path(path, field));
            }
        }

        for (name, property) in &object.properties {
            if let Some(value) = map.get(name) {
                self.check_property(report, &property.schema, value, path, name);
            }
        }
    }

    fn check_property(
        &self,
        report: &mut ValidationReport,
        schema: &PropertySchema,
        value: &Value,
        parent_path: &str,
        field: &str,
    ) {
        match schema {
            PropertySchema::Reference(model_name) => {
                if let Some(model) = self.spec.models.get(model_name) {
                    self.check_model(report, &model.kind, value, &join_path(parent_path, field));
                }
            }
            PropertySchema::Array(items) => {
                self.check_array(report, items, value, &join_path(parent_path, field));
            }
            PropertySchema::Scalar(expected) => {
                if !is_correct_simple_type(expected, value, true) {
                    report.push_mismatch(&join_path(parent_path, field), expected, value);
                }
            }
            PropertySchema::Any => {}
        }
    }

    fn check_array(
        &self,
        report: &mut ValidationReport,
        items: &PropertySchema,
        data: &Value,
        path: &str,
    ) {
        if data.is_null() {
            return;
        }
        let Some(elements) = data.as_array() else {
            report.push_mismatch(path, "array", data);
            return;
        };
        for (index, element) in elements.iter().enumerate() {
            self.check_property(report, items, element, path, &format!("[{}]", index));
        }
    }
}

fn check_enum(report: &mut ValidationReport, values: &[String], data: &Value, path: &str) {
    if data.is_null() {
        return;
    }
    let matched = data
        .as_str()
        .is_some_and(|candidate| values.iter().any(|value| value == candidate));
    if !matched {
        report.push_mismatch(path, "enum", data);
    }
}

fn check_flat_params(
    report: &mut ValidationReport,
    schema: &IndexMap<String, ParamSpec>,
    params: &Map<String, Value>,
) {
    for (name, spec) in schema {
        match params.get(name) {
            None => {
                if spec.required {
                    report.required.push(name.clone());
                }
            }
            // A present value must be concretely well-typed: null is a
            // mismatch here, unlike inside body validation.
            Some(value) => {
                if !is_correct_simple_type(&spec.ty, value, false) {
                    report.push_mismatch(name, &spec.ty, value);
                }
            }
        }
    }
}

/// Checks a value against a declared simple type name.
///
/// JSON booleans never satisfy `integer` or `number` — they are a distinct
/// `Value` variant, and the rule is intentional, not incidental. Numeric
/// strings are accepted for `integer` (ASCII digits only) and `number`
/// (anything `f64` parses), a leniency for form/query-encoded values.
/// Unrecognized type names match nothing.
fn is_correct_simple_type(expected_type: &str, value: &Value, allow_null: bool) -> bool {
    if value.is_null() {
        return allow_null;
    }
    match expected_type {
        "string" => value.is_string(),
        "boolean" => value.is_boolean(),
        "integer" => match value {
            Value::Number(number) => number.is_i64() || number.is_u64(),
            Value::String(text) => {
                !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
            }
            _ => false,
        },
        "number" => match value {
            Value::Number(_) => true,
            Value::String(text) => text.parse::<f64>().is_ok(),
            _ => false,
        },
        _ => false,
    }
}

/// Joins a parent path and a field segment: dot-separated for named fields,
/// bare concatenation for `[index]` segments and the root.
fn join_path(path: &str, field: &str) -> String {
    if path.is_empty() || field.starts_with('[') {
        format!("{}{}", path, field)
    } else {
        format!("{}.{}", path, field)
    }
}

fn object_argument<'v>(
    value: Option<&'v Value>,
    parameter: &str,
) -> AppResult<Option<&'v Map<String, Value>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(AppError::IllegalArgument(format!(
            "The {} parameter must be an object",
            parameter
        ))),
    }
}
