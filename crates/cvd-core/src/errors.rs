//! Cross-cutting error types.
//!
//! Artifact and pipeline errors live in `cvd-inference`; a unified error is
//! deferred to `cvd-cli` where everything converges on `anyhow`.

use thiserror::Error;

/// Errors raised while collecting or validating survey answers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A submit was attempted before every question was answered.
    #[error("Survey is incomplete; missing: {}", .missing.join(", "))]
    Incomplete { missing: Vec<String> },

    /// A categorical answer is not one of the fixed options.
    #[error("Unknown value for {field}: '{value}'")]
    UnknownValue { field: String, value: String },

    /// A numeric answer is outside its allowed range.
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
