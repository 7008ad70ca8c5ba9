//! Error types for the text generation client

use thiserror::Error;

/// Errors that can occur when calling the hosted text generation API
#[derive(Debug, Error)]
pub enum AiError {
    /// The upstream answered with a non-success status
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// The request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream answered but produced no text
    #[error("Upstream returned no text")]
    EmptyResponse,
}
