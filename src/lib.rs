#![deny(missing_docs)]

//! # FDM Swagger
//!
//! Parses a Swagger 2.0-shaped specification document into a normalized
//! registry of models and operations, and validates request payloads and URL
//! parameters against that registry.
//!
//! The crate performs no I/O of its own: specification and documentation
//! documents arrive as decoded [`serde_json::Value`] trees (or JSON/YAML text),
//! and results leave as typed registry structures and validation reports.
//!
//! Typical flow:
//!
//! ```ignore
//! let spec = fdm_swagger::parse_spec_yaml(spec_yaml, None)?;
//! let validator = fdm_swagger::SwaggerValidator::new(&spec);
//! match validator.validate_data("addNetworkObject", Some(&payload))? {
//!     ValidationOutcome::Valid => { /* submit the request */ }
//!     ValidationOutcome::Invalid(report) => { /* surface `report` */ }
//! }
//! ```

/// Shared error types.
pub mod error;

/// Swagger registry parsing and validation.
pub mod swagger;

pub use error::{AppError, AppResult};
pub use swagger::models::{
    HttpMethod, Model, ModelKind, ObjectModel, Operation, OperationParams, ParamSpec, Property,
    PropertySchema, SwaggerSpec, FILE_MODEL_NAME,
};
pub use swagger::parser::{parse_spec, parse_spec_json, parse_spec_yaml};
pub use swagger::validator::{
    SwaggerValidator, TypeMismatch, ValidationOutcome, ValidationReport,
};
