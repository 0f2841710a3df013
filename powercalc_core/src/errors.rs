//! # Error Types
//!
//! Structured error types for powercalc_core. Field-level validation failures
//! are *not* errors: they come back as data in a
//! [`ValidationReport`](crate::validation::ValidationReport) so a form can show
//! them next to each input. `CalcError` covers everything that stops the engine
//! from even getting that far.
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::errors::{CalcError, CalcResult};
//!
//! fn check_divisor(years: f64) -> CalcResult<()> {
//!     if years <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "amortization_years",
//!             years.to_string(),
//!             "Amortization period must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_divisor(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for powercalc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for engine operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The requested domain id is not in the registry
    #[error("Unknown calculation domain: {domain_id}")]
    UnknownDomain { domain_id: String },

    /// Two descriptors were registered under the same id
    #[error("Duplicate calculation domain: {domain_id}")]
    DuplicateDomain { domain_id: String },

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A field the formula needs was absent from the parsed inputs
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// An assumptions file parsed but holds unusable values
    #[error("Invalid settings: {reason}")]
    InvalidSettings { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an UnknownDomain error
    pub fn unknown_domain(domain_id: impl Into<String>) -> Self {
        CalcError::UnknownDomain {
            domain_id: domain_id.into(),
        }
    }

    /// Create a DuplicateDomain error
    pub fn duplicate_domain(domain_id: impl Into<String>) -> Self {
        CalcError::DuplicateDomain {
            domain_id: domain_id.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidSettings error
    pub fn invalid_settings(reason: impl Into<String>) -> Self {
        CalcError::InvalidSettings {
            reason: reason.into(),
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

    /// True when the caller asked for something that does not exist,
    /// as opposed to something that failed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CalcError::UnknownDomain { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::UnknownDomain { .. } => "UNKNOWN_DOMAIN",
            CalcError::DuplicateDomain { .. } => "DUPLICATE_DOMAIN",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InvalidSettings { .. } => "INVALID_SETTINGS",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}
