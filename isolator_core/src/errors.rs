//! # Error Types
//!
//! Structured error types for isolator_core. Fatal conditions abort the
//! design pipeline and carry enough context to tell the caller which input
//! to change.
//!
//! Limit exceedances on user-supplied geometry are *not* errors by default:
//! they are reported as [`LimitWarning`](crate::calculations::design::LimitWarning)
//! values attached to the design result. Only the opt-in strict policy turns
//! them into [`CalcError::LimitExceeded`].
//!
//! ## Example
//!
//! ```rust
//! use isolator_core::errors::{CalcError, CalcResult};
//!
//! fn validate_load(load_t: f64) -> CalcResult<()> {
//!     if load_t <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "vertical_load_t",
//!             load_t.to_string(),
//!             "Vertical load must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_load(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for isolator_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive load, negative coefficient, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Derived geometry is degenerate (zero layer thickness, zero rubber height, ...)
    #[error("Invalid geometry for '{quantity}': {value} - {reason}")]
    InvalidGeometry {
        quantity: String,
        value: String,
        reason: String,
    },

    /// A supplied dimension exceeds a code limit and the strict policy is active
    #[error("Limit exceeded: {check} = {actual:.3} exceeds {limit:.3}")]
    LimitExceeded {
        check: String,
        actual: f64,
        limit: f64,
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

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(quantity: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            quantity: quantity.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a LimitExceeded error
    pub fn limit_exceeded(check: impl Into<String>, actual: f64, limit: f64) -> Self {
        CalcError::LimitExceeded {
            check: check.into(),
            actual,
            limit,
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's numbers rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::InvalidGeometry { .. } | CalcError::LimitExceeded { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("vertical_load_t", "-5", "Vertical load must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_geometry("layer_thickness_mm", "0", "zero").error_code(),
            "INVALID_GEOMETRY"
        );
        assert_eq!(CalcError::limit_exceeded("stress", 12.0, 11.0).error_code(), "LIMIT_EXCEEDED");
        assert_eq!(CalcError::serialization("bad json").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(CalcError::invalid_input("a", "b", "c").is_input_error());
        assert!(!CalcError::file_error("open", "x.json", "missing").is_input_error());
    }

    #[test]
    fn test_limit_exceeded_message() {
        let msg = CalcError::limit_exceeded("compressive stress (MPa)", 12.5, 11.0).to_string();
        assert_eq!(msg, "Limit exceeded: compressive stress (MPa) = 12.500 exceeds 11.000");
    }
}
