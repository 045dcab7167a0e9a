//! Error types for model operations.

use thiserror::Error;

/// Errors raised by the project aggregate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Lifecycle state name is not one of the recognized states.
    #[error("invalid state '{0}', expected one of: planning, in_production, post_production, completed")]
    InvalidState(String),

    /// Field name is not an updatable project attribute.
    #[error("unknown field '{0}', expected one of: name, director, budget, start_date, end_date, state")]
    UnknownField(String),

    /// Value could not be parsed for the named field.
    #[error("invalid value for {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
