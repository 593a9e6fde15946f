//! Errors returned by every API call.
//!
//! The backend's failure contract is flat: any non-2xx status becomes
//! [`ApiError::RequestFailed`] carrying the raw response body, and callers
//! inspect that body themselves if they need to tell failures apart.

use reqwest::StatusCode;
use thiserror::Error;

use tienda_core::ValidationError;

/// Error type for all storefront and admin API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    ///
    /// Displays as the response body verbatim.
    #[error("{body}")]
    RequestFailed {
        /// HTTP status of the response.
        status: StatusCode,
        /// Raw response body text.
        body: String,
    },

    /// The request never produced a response (DNS, connection, TLS...).
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// A success response did not match the expected JSON shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request URL could not be built.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// The payload was rejected before sending.
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// A file to upload could not be read.
    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// The raw response body, if the backend answered with a failure.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The response status, if the backend answered with a failure.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend answered with a non-success status.
    #[must_use]
    pub const fn is_request_failed(&self) -> bool {
        matches!(self, Self::RequestFailed { .. })
    }
}
