//! # Error Types
//!
//! Structured error types for cost_core. The estimating engine itself never
//! fails: out-of-range numbers are clamped and unknown selections fall back
//! to documented defaults. Errors only come from the edges, i.e. reading
//! configuration or order documents and parsing user-typed choice names.
//!
//! ## Example
//!
//! ```rust
//! use cost_core::errors::{CostError, CostResult};
//!
//! fn parse_quantity(raw: &str) -> CostResult<f64> {
//!     raw.trim().parse::<f64>().map_err(|e| {
//!         CostError::invalid_input("order_quantity", raw, e.to_string())
//!     })
//! }
//!
//! assert!(parse_quantity("10000").is_ok());
//! assert_eq!(parse_quantity("lots").unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cost_core operations
pub type CostResult<T> = Result<T, CostError>;

/// Structured error type for loading and parsing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CostError {
    /// An input value could not be interpreted
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A choice name (die bucket, gluing type, price mode, ...) is not recognised
    #[error("Unknown {kind}: '{value}' (expected one of: {expected})")]
    UnknownOption {
        kind: String,
        value: String,
        expected: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CostError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CostError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownOption error listing the accepted names
    pub fn unknown_option(kind: impl Into<String>, value: impl Into<String>, expected: &[&str]) -> Self {
        CostError::UnknownOption {
            kind: kind.into(),
            value: value.into(),
            expected: expected.join(", "),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CostError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CostError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CostError::InvalidInput { .. } => "INVALID_INPUT",
            CostError::UnknownOption { .. } => "UNKNOWN_OPTION",
            CostError::FileError { .. } => "FILE_ERROR",
            CostError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CostError {
    fn from(e: serde_json::Error) -> Self {
        CostError::serialization(e.to_string())
    }
}
