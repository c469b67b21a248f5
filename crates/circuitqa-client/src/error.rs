//! Error types for the backend client.

use thiserror::Error;

use circuitqa_core::UiError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL does not parse.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A state-changing request was attempted without the CSRF cookie.
    #[error("Missing CSRF token: no '{0}' cookie")]
    MissingCsrfToken(String),

    /// API returned a non-2xx response.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no error message"))]
    Api {
        status: u16,
        message: Option<String>,
    },
}

impl From<ClientError> for UiError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Api { status, message } => UiError::request(status, message),
            ClientError::Http(err) if err.is_timeout() => {
                UiError::Transport("the server took too long to respond".into())
            }
            other => UiError::Transport(other.to_string()),
        }
    }
}
