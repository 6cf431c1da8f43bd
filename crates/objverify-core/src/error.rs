//! # Error Types
//!
//! Errors raised while building values from external data. Validation
//! itself never errors; it only answers yes or no.

use thiserror::Error;

/// Error raised while constructing values or records.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A JSON integer does not fit in a signed 64-bit integer.
    #[error("integer {0} does not fit in a 64-bit signed integer")]
    IntegerOutOfRange(String),

    /// A record was requested from JSON that is not an object.
    #[error("expected a JSON object to build a record, found {found}")]
    NotAnObject {
        /// JSON type name of the rejected document.
        found: &'static str,
    },

    /// JSON parsing failed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
