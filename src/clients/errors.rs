//! HTTP-specific error types for the JSS API client.
//!
//! This module contains error types for the session layer, including mapped
//! response errors, transport failures, and request validation failures.
//!
//! # Error Handling
//!
//! Every non-2xx response is mapped onto one [`HttpError`] variant:
//!
//! | Status | Variant |
//! |---|---|
//! | 401, 403 | [`HttpError::Authentication`] |
//! | 404 | [`HttpError::NotFound`] |
//! | 400, 409 | [`HttpError::Validation`] |
//! | anything else | [`HttpError::UnexpectedStatus`] |
//!
//! Connection failures and timeouts surface as [`HttpError::Transport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use jss_api::clients::HttpError;
//!
//! match session.raw_get("/policies").await {
//!     Ok(body) => println!("{body}"),
//!     Err(HttpError::Authentication(e)) => println!("Check credentials: {e}"),
//!     Err(HttpError::NotFound(e)) => println!("Missing: {}", e.path),
//!     Err(e) if e.is_transport() => println!("Server unreachable: {e}"),
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

/// Details of a non-successful HTTP response.
///
/// The message is a readable summary of the server's reply body, with
/// markup removed.
///
/// # Example
///
/// ```rust
/// use jss_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 409,
///     path: "/policies/id/0".to_string(),
///     message: "Error: Duplicate name".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 409 for /policies/id/0: Error: Duplicate name");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {code} for {path}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The request path, relative to the API root.
    pub path: String,
    /// Server detail extracted from the response body.
    pub message: String,
}

/// Error raised when a request could not be delivered or answered.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failure reported by the reqwest client (connect, TLS, timeout, body).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a custom [`Transport`](crate::clients::Transport).
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the failure.
        message: String,
    },
}

/// Error returned when a request fails validation before it is sent.
///
/// # Example
///
/// ```rust
/// use jss_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all session-level failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server rejected the credentials (401 or 403).
    #[error("Authentication failed: {0}")]
    Authentication(HttpResponseError),

    /// The requested path does not exist (404).
    #[error("Not found: {0}")]
    NotFound(HttpResponseError),

    /// The server rejected the request body (400 or 409).
    #[error("Validation failed: {0}")]
    Validation(HttpResponseError),

    /// Any other non-2xx status.
    #[error("Unexpected response: {0}")]
    UnexpectedStatus(HttpResponseError),

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Request validation failed before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

impl HttpError {
    /// Maps a non-2xx response onto its error class.
    #[must_use]
    pub fn from_response(response: HttpResponseError) -> Self {
        match response.code {
            401 | 403 => Self::Authentication(response),
            404 => Self::NotFound(response),
            400 | 409 => Self::Validation(response),
            _ => Self::UnexpectedStatus(response),
        }
    }

    /// Returns the response details, if the server answered.
    #[must_use]
    pub const fn response(&self) -> Option<&HttpResponseError> {
        match self {
            Self::Authentication(e)
            | Self::NotFound(e)
            | Self::Validation(e)
            | Self::UnexpectedStatus(e) => Some(e),
            Self::Transport(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Returns `true` for 401 and 403 responses.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Returns `true` for 404 responses.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` for 400 and 409 responses.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` for connection failures and unexpected statuses.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::UnexpectedStatus(_))
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
    assert_send_sync::<TransportError>();
};
