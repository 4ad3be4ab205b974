#![deny(missing_docs)]

//! # Swagger Module
//!
//! - **models**: typed registry structures (operations, models, parameters).
//! - **refs**: `$ref` target extraction and `allOf` chain resolution.
//! - **parser**: raw specification document -> registry.
//! - **validator**: registry-driven payload and URL parameter validation.

pub mod models;
pub mod parser;
pub(crate) mod refs;
pub mod validator;

pub use models::{Operation, SwaggerSpec};
pub use parser::parse_spec;
pub use validator::SwaggerValidator;
