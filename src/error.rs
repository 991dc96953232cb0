//! Error types for jobdex
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Errors that abort a discovery pass.
///
/// Resolution failures (a class that simply is not a handler) are not errors;
/// every variant here is a programming mistake in a job declaration and is
/// fatal for the whole pass.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A parameter set annotation with no descriptors
    #[error("request type {request_type}: parameter set on attribute '{attribute}' must define at least one parameter")]
    EmptyDescriptorList {
        request_type: String,
        attribute: String,
    },

    /// A descriptor without a usable name
    #[error("request type {request_type}: parameter definition at position {position} must have a non-blank 'name'")]
    MissingName {
        request_type: String,
        position: usize,
    },

    /// A descriptor without an explicit type
    #[error("request type {request_type}: parameter '{parameter}' must have a 'type' attribute naming its type")]
    MissingType {
        request_type: String,
        parameter: String,
    },

    /// More than one attribute carries a parameter set
    #[error("request type {request_type}: attributes '{first}' and '{second}' both carry a parameter set, only one is allowed")]
    MultipleExternalSchemas {
        request_type: String,
        first: String,
        second: String,
    },

    /// The parameter set attribute is not the string identifier type
    #[error("request type {request_type}: attribute '{attribute}' carries a parameter set but is of type {found}, not String")]
    InvalidExternalFieldType {
        request_type: String,
        attribute: String,
        found: String,
    },

    /// An external descriptor names a type outside the supported set
    #[error("request type {request_type}: parameter '{parameter}' has unsupported type '{type_name}'")]
    UnresolvableType {
        request_type: String,
        parameter: String,
        type_name: String,
    },

    /// Two handlers resolved to the same job-type name
    #[error("job type '{job_type}' is declared by both {first_handler} and {second_handler}")]
    NamingConflict {
        job_type: String,
        first_handler: String,
        second_handler: String,
    },

    /// Configuration file error
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for jobdex operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// A single violation found while validating submitted parameter values
/// against a job schema.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Required parameter missing or blank
    #[error("parameter '{0}' is required")]
    MissingRequired(String),

    /// Value is not a whole number
    #[error("parameter '{0}' must be a whole number")]
    NotAnInteger(String),

    /// Value is not a boolean literal
    #[error("parameter '{0}' must be 'true' or 'false'")]
    NotABoolean(String),

    /// Value is not a calendar date
    #[error("parameter '{0}' must be a date in YYYY-MM-DD format")]
    NotADate(String),

    /// Value is not a date-time
    #[error("parameter '{0}' must be a date-time in YYYY-MM-DDTHH:MM:SS format")]
    NotADateTime(String),

    /// Value is not one of the declared enum constants
    #[error("parameter '{0}': '{1}' is not an allowed value")]
    UnknownEnumValue(String, String),

    /// Submitted key does not exist in the schema
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
}
