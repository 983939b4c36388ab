//! Error types for Staffing CRM filtering
//!
//! Evaluation itself never fails. These errors only surface at the edges:
//! reading JSON input, loading configuration, and advisory validation of a
//! filter specification against a field catalogue.

use thiserror::Error;

/// Problems found when checking a filter specification against a catalogue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Condition {condition} in group {group} has no field")]
    BlankField { group: usize, condition: usize },

    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Unrecognized operator '{operator}' on field {field}")]
    UnrecognizedOperator { field: String, operator: String },

    #[error("Operator {operator} is not allowed for {kind} field {field}")]
    OperatorNotAllowed {
        field: String,
        operator: String,
        kind: String,
    },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Errors reading records or specifications from outside the process.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid JSON: {reason}")]
    InvalidJson { reason: String },

    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },
}

/// Master error type for Staffing CRM filtering.
#[derive(Debug, Clone, Error)]
pub enum StaffingError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// Result type alias for Staffing CRM operations.
pub type StaffingResult<T> = Result<T, StaffingError>;

// =============================================================================
// TESTS
// =============================================================================
