#![deny(missing_docs)]

//! # Registry Models
//!
//! Typed intermediate representation for a parsed Swagger 2.0 specification:
//! operations keyed by `operationId`, model schemas keyed by definition name,
//! and the derived model-to-operations index.
//!
//! The registry is immutable after construction and never references the raw
//! input document, so it can be shared freely across threads and validator
//! instances.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel model name assigned to operations whose success response is a
/// file download rather than a JSON body.
pub const FILE_MODEL_NAME: &str = "_File";

/// HTTP method of an operation, as spelled in the `paths` section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `get`
    Get,
    /// `post`
    Post,
    /// `put`
    Put,
    /// `delete`
    Delete,
    /// Any other method key found in the document (e.g. `patch`).
    Other(String),
}

impl HttpMethod {
    /// Classifies a raw method key. Matching is case-insensitive; unknown
    /// methods are preserved verbatim.
    pub fn parse(method: &str) -> Self {
        match method.to_ascii_lowercase().as_str() {
            "get" => HttpMethod::Get,
            "post" => HttpMethod::Post,
            "put" => HttpMethod::Put,
            "delete" => HttpMethod::Delete,
            _ => HttpMethod::Other(method.to_string()),
        }
    }

    /// Returns the lowercase method name for known methods, or the original
    /// spelling for unrecognized ones.
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Other(other) => other,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single path or query parameter declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    /// Declared simple type name (`string`, `integer`, `boolean`, `number`).
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Human-readable description, filled only from a documentation overlay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// URL parameters of an operation, partitioned by location.
///
/// `body`, `header`, and `formData` parameters are not represented here;
/// request bodies are governed by the operation's model instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OperationParams {
    /// Path parameters keyed by name.
    pub path: IndexMap<String, ParamSpec>,
    /// Query parameters keyed by name.
    pub query: IndexMap<String, ParamSpec>,
}

/// One HTTP method on one URL path, normalized with a resolved governing
/// model name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// HTTP method.
    pub method: HttpMethod,
    /// Full URL path, `basePath` included.
    pub url: String,
    /// Name of the model governing this operation's body, when one could be
    /// determined.
    pub model_name: Option<String>,
    /// Whether the success response carries a list of items rather than a
    /// single object.
    pub returns_multiple: bool,
    /// Tags attached to the operation in the source document.
    pub tags: Vec<String>,
    /// Path/query parameter declarations, present only when the source
    /// operation declares a `parameters` list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<OperationParams>,
    /// Human-readable description, filled only from a documentation overlay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Schema of a single model property, reduced to what validation needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropertySchema {
    /// `type: object` with a `$ref`; holds the referenced model name.
    Reference(String),
    /// `type: array`; holds the `items` schema, possibly nested.
    Array(Box<PropertySchema>),
    /// A simple type, kept verbatim as declared. Unrecognized type names
    /// never match any value.
    Scalar(String),
    /// A property whose schema could not be resolved (no usable `type`,
    /// `$ref`, or `items`). Validation skips such properties.
    Any,
}

/// A declared property of an object model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    /// The property's schema.
    pub schema: PropertySchema,
    /// Whether the property name appears in the owning model's `required`
    /// list. Display-only denormalization; the validator consults the model's
    /// `required` list directly.
    pub required: bool,
    /// Human-readable description, filled only from a documentation overlay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An object-typed model definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObjectModel {
    /// Field names that must be present and non-null.
    pub required: Vec<String>,
    /// Declared properties keyed by name.
    pub properties: IndexMap<String, Property>,
}

/// Structural classification of a model definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ModelKind {
    /// `type: object` with properties.
    Object(ObjectModel),
    /// `type: string` with an `enum` member list.
    Enum(Vec<String>),
    /// Anything else: `allOf` composites, scalar aliases, malformed entries.
    /// Validation against such a model is vacuous.
    Untyped,
}

/// A named schema from the specification's `definitions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    /// Human-readable description, filled only from a documentation overlay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Structural classification.
    pub kind: ModelKind,
}

/// The parsed registry: models, operations, and the model-to-operations
/// index.
///
/// `model_operations` is a pure projection of `operations` grouped by
/// `model_name`; the `None` bucket collects operations whose governing model
/// could not be determined (e.g. DELETE operations without a matching
/// definition).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SwaggerSpec {
    /// Model schemas keyed by definition name.
    pub models: IndexMap<String, Model>,
    /// Operations keyed by `operationId`.
    pub operations: IndexMap<String, Operation>,
    /// Operations grouped by governing model name.
    pub model_operations: IndexMap<Option<String>, IndexMap<String, Operation>>,
}

impl SwaggerSpec {
    /// Looks up an operation by `operationId`.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Looks up a model by definition name.
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// Returns all operations governed by the given model name, or by no
    /// model when `None` is passed.
    pub fn operations_for_model(&self, name: Option<&str>) -> Option<&IndexMap<String, Operation>> {
        self.model_operations.get(&name.map(String::from))
    }
}
