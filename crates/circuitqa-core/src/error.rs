//! Error taxonomy for front-end operations.
//!
//! None of these are fatal: every variant maps to a notification via
//! [`UiError::severity`] and [`UiError::user_message`].

use thiserror::Error;

use crate::notify::Severity;

/// Result type for front-end operations.
pub type UiResult<T> = Result<T, UiError>;

/// Errors surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// A required field was empty or malformed. Blocks the request.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend answered with a non-2xx status.
    #[error("Request failed ({status}): {message}")]
    Request { status: u16, message: String },

    /// Network failure, timeout or unparseable response body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Copying to the clipboard failed.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// A submission from the same form is still in flight.
    #[error("A request is already in progress")]
    Busy,
}

impl UiError {
    /// Build a request error, falling back to a generic message when the
    /// backend did not supply one.
    pub fn request(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        UiError::Request { status, message }
    }

    /// Severity of the notification that reports this error.
    pub fn severity(&self) -> Severity {
        match self {
            UiError::Validation(_) => Severity::Warning,
            UiError::Busy => Severity::Info,
            UiError::Request { .. } | UiError::Transport(_) | UiError::Clipboard(_) => {
                Severity::Error
            }
        }
    }

    /// Text shown in the notification.
    pub fn user_message(&self) -> String {
        match self {
            UiError::Validation(msg) => msg.clone(),
            UiError::Request { message, .. } => message.clone(),
            UiError::Transport(detail) => format!("An error occurred: {detail}"),
            UiError::Clipboard(_) => "Failed to copy to clipboard".to_string(),
            UiError::Busy => "Please wait for the current request to finish".to_string(),
        }
    }
}

impl From<serde_json::Error> for UiError {
    fn from(e: serde_json::Error) -> Self {
        UiError::Transport(e.to_string())
    }
}
