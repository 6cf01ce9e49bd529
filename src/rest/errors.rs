//! Resource-specific error types.
//!
//! This module contains the error type for resource operations, extending
//! [`HttpError`] with object-level semantics like `NotFound`,
//! `NotPersisted` and `RootMismatch`.
//!
//! # Error Handling
//!
//! Session errors are mapped to resource variants:
//!
//! - **404**: [`ResourceError::NotFound`] - The object doesn't exist
//! - **400/409**: [`ResourceError::ValidationFailed`] - The server rejected the document
//! - **Everything else**: [`ResourceError::Http`] - Wrapped session error
//!
//! # Example
//!
//! ```rust,ignore
//! use jss_api::rest::{ResourceError, ResourceKind, ResourceObject};
//!
//! match ResourceObject::fetch(&session, ResourceKind::Policy, 123).await {
//!     Ok(policy) => println!("Found: {:?}", policy.name()),
//!     Err(ResourceError::NotFound { resource, id }) => {
//!         println!("{resource} with id {id} not found");
//!     }
//!     Err(e) if e.is_authentication() => println!("Check the API account"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::xml::XmlError;

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use jss_api::rest::ResourceError;
///
/// let error = ResourceError::NotFound {
///     resource: "Policy",
///     id: "123".to_string(),
/// };
/// assert_eq!(error.to_string(), "Policy with id 123 not found");
/// assert!(error.is_not_found());
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The object was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The kind name (e.g. "Policy").
        resource: &'static str,
        /// The id or name that was requested.
        id: String,
    },

    /// The server rejected the document (HTTP 400 or 409).
    #[error("Validation failed for {resource} (HTTP {code}): {message}")]
    ValidationFailed {
        /// The kind name.
        resource: &'static str,
        /// The HTTP status code.
        code: u16,
        /// Server detail extracted from the response.
        message: String,
    },

    /// The operation needs a server id but the object was never saved.
    #[error("Cannot {operation} {resource}: object has not been created on the server")]
    NotPersisted {
        /// The kind name.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// The object was deleted from the server.
    #[error("{resource} with id {id} has been deleted")]
    Deleted {
        /// The kind name.
        resource: &'static str,
        /// The id the object had.
        id: u64,
    },

    /// The document's root element does not match the kind.
    #[error("Expected <{expected}> document for {resource}, found <{found}>")]
    RootMismatch {
        /// The kind name.
        resource: &'static str,
        /// The root tag the kind requires.
        expected: &'static str,
        /// The root tag that was found.
        found: String,
    },

    /// The field is not declared by the kind.
    #[error("{resource} has no field named '{field}'")]
    UnknownField {
        /// The kind name.
        resource: &'static str,
        /// The requested field name.
        field: String,
    },

    /// A fetched document did not contain a usable id.
    #[error("{resource} document has no numeric id at '{path}'")]
    MissingId {
        /// The kind name.
        resource: &'static str,
        /// The element path that was searched.
        path: &'static str,
    },

    /// The create reply did not contain a usable id.
    #[error("Create reply for {resource} has no numeric id at '{path}'")]
    MissingCreatedId {
        /// The kind name.
        resource: &'static str,
        /// The element path that was searched.
        path: String,
    },

    /// A listing entry carries an id that is not a positive integer.
    #[error("Invalid {resource} listing: {reason}")]
    InvalidListing {
        /// The kind name.
        resource: &'static str,
        /// Why the listing was rejected.
        reason: String,
    },

    /// A request or response document could not be handled.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// A session-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Maps a session error for an operation on `resource`.
    ///
    /// - `NotFound` -> [`ResourceError::NotFound`] with `id` (or `"unknown"`)
    /// - `Validation` -> [`ResourceError::ValidationFailed`]
    /// - Other -> [`ResourceError::Http`]
    #[must_use]
    pub fn from_http_error(error: HttpError, resource: &'static str, id: Option<&str>) -> Self {
        match error {
            HttpError::NotFound(_) => Self::NotFound {
                resource,
                id: id.unwrap_or("unknown").to_string(),
            },
            HttpError::Validation(response) => Self::ValidationFailed {
                resource,
                code: response.code,
                message: response.message,
            },
            other => Self::Http(other),
        }
    }

    /// Returns `true` if the object does not exist on the server.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || matches!(self, Self::Http(e) if e.is_not_found())
    }

    /// Returns `true` if the server rejected the credentials.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_authentication())
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
