//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.
//!
//! Two error channels are kept strictly apart: [`AppError::IllegalArgument`]
//! signals validator misuse by the caller, while validation *failures* never
//! surface here — they travel through the validator's report type.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A validator entry point was invoked with structurally invalid
    /// arguments (empty operation name, non-object payload, unknown
    /// operation).
    #[from(ignore)]
    #[display("Illegal Argument: {_0}")]
    IllegalArgument(String),

    /// The specification document lacks a section the parser cannot work
    /// without (`definitions`, `basePath`).
    #[from(ignore)]
    #[display("Malformed Spec: {_0}")]
    MalformedSpec(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversion() {
        // String defaults to General, not the annotated variants
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_illegal_argument_display() {
        let app_err = AppError::IllegalArgument("bad call".into());
        assert_eq!(format!("{}", app_err), "Illegal Argument: bad call");
    }

    #[test]
    fn test_malformed_spec_display() {
        let app_err = AppError::MalformedSpec("missing 'basePath'".into());
        assert_eq!(format!("{}", app_err), "Malformed Spec: missing 'basePath'");
    }
}
