/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Domain checks that produce a distinguishable 4xx response:
 * - Missing or invalid credentials (401)
 * - Role, ownership or verification mismatch (403)
 * - Missing resources (404)
 * - Duplicate email, username, favorite or review (409)
 *
 * ## Infrastructure Errors
 *
 * Storage, token signing and upstream AI failures. These are logged with full
 * detail and reported to the caller with a static message.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::backend::ai::AiError;
use crate::shared::SharedError;

/// Static message returned for every 5xx response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use studentnest::backend::error::BackendError;
///
/// let err = BackendError::conflict("Property already in favorites");
/// let err = BackendError::forbidden("Only the owner can edit this property");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid input, failed authorization)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JWT signing failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Hosted text generation failure
    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 Bad Request for validation, 500 otherwise
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::UnknownVariant { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Database(_)
            | Self::Token(_)
            | Self::PasswordHash(_)
            | Self::Ai(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message reported to the client
    ///
    /// Server-side failures never leak their details.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) if self.status_code().is_client_error() => err.to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether this is a unique-constraint violation reported by the store
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(err) => is_unique_violation(err),
            _ => false,
        }
    }
}

/// Check a sqlx error for a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

/// Result alias used by handlers and storage helpers
pub type BackendResult<T> = Result<T, BackendError>;
