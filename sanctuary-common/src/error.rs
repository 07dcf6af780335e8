//! Common error types for Sound Sanctuary

use thiserror::Error;

/// Common result type for Sound Sanctuary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fresh input (construction or assignment) violated a field rule
///
/// The record the input was meant for is never left partially updated.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Human-readable reason
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Previously persisted data failed to load
///
/// Kept apart from [`ValidationError`] so storage collaborators can choose a
/// different recovery policy (drop, quarantine, propagate).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeserializationError {
    /// Stored identifier is not a valid UUID
    #[error("stored id is not a valid UUID: {value:?}")]
    InvalidId { value: String },

    /// Stored source type does not name a known variant
    #[error("stored source_type is not a known variant: {value:?}")]
    InvalidSourceType { value: String },

    /// Required column was NULL
    #[error("stored {field} is missing")]
    MissingField { field: &'static str },

    /// Stored tags column is neither NULL nor an array
    #[error("stored tags are malformed: {reason}")]
    InvalidTags { reason: String },

    /// Stored value violates a field rule
    #[error("stored record is invalid: {0}")]
    Invalid(ValidationError),
}

/// Common error types across Sound Sanctuary crates
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected by a field rule
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Stored data could not be loaded
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] DeserializationError),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
