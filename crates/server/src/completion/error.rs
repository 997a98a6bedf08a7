//! Error types for the completion client.

use thiserror::Error;

/// Errors that can occur when calling the completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No API key is configured; the call is refused before any I/O.
    #[error("completion API key is not configured")]
    MissingCredential,

    /// HTTP request failed (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion service answered with a non-success status.
    #[error("completion service returned {status}: {message}")]
    Upstream {
        /// HTTP status code from the upstream.
        status: u16,
        /// Error message, parsed from the body when possible.
        message: String,
    },

    /// Failed to parse the response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Error body the completion service returns on non-success statuses
/// (OpenAI-compatible shape). Only the message is consumed; serde drops
/// the rest.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Nested error details.
    pub error: ApiErrorDetail,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// Error message.
    pub message: String,
}
