//! Unified error taxonomy for remote API calls.
//!
//! Every failure mode an API call can hit maps onto exactly one variant, so
//! callers can branch on the class of failure without inspecting transport
//! detail. The renewal protocol in [`crate::api`] is the only place that
//! produces `SessionExpired`.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur when calling the shop API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable response was received (DNS, connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The session could not be renewed: either the replayed request was
    /// rejected again, or the refresh credential itself was rejected.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// A 4xx response other than 401. The message is the server's own text,
    /// surfaced verbatim for display.
    #[error("request rejected ({status}): {message}")]
    Validation { status: u16, message: String },

    /// A 5xx response. Body detail is logged, not surfaced.
    #[error("server error ({0})")]
    Server(u16),

    /// A success response carried a body we could not deserialize.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing the credential store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// A user-facing message for this error.
    ///
    /// Validation errors carry the server's text; everything else collapses
    /// to a generic phrase so transport detail never leaks into UI copy.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::SessionExpired => "Session expired, please log in again".to_string(),
            Self::Transport(_) => "Could not reach the store, please try again".to_string(),
            Self::Server(_) | Self::Parse(_) | Self::Storage(_) | Self::Url(_) => {
                "Something went wrong, please try again".to_string()
            }
        }
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
