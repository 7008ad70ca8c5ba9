//! Shared Error Types
//!
//! This module defines error types raised while building or validating the
//! shared domain types, before any storage or HTTP concern is involved.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A request field failed validation
//! - `UnknownVariant` - A stored or submitted string does not name a known enum variant
//!
//! # Usage
//!
//! ```rust
//! use studentnest::shared::error::SharedError;
//!
//! let error = SharedError::validation("rating", "Rating must be between 1 and 5");
//! ```
use thiserror::Error;

/// Errors raised by the shared domain types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A string that should name an enum variant did not
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant {
        /// Which enum was being parsed (e.g. "role")
        kind: &'static str,
        /// The offending value
        value: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown-variant error
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
