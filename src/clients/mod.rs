//! HTTP layer for JSS API communication.
//!
//! This module provides the session and transport layer for making
//! authenticated requests to the JSS Classic API. It handles request
//! validation, Basic authentication, and mapping of error statuses.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Session`]: An authenticated connection exposing `raw_get`, `raw_post`,
//!   `raw_put` and `raw_delete`
//! - [`Transport`]: The seam that actually performs HTTP, with
//!   [`ReqwestTransport`] as the default implementation
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A response returned by a transport
//! - [`HttpError`]: Session-level failures
//!
//! # Example
//!
//! ```rust,ignore
//! use jss_api::{JssPrefs, Session};
//!
//! let session = Session::from_source(&JssPrefs::default_location()?)?;
//!
//! let xml = session.raw_get("/computers/id/12").await?;
//! session.raw_put("/computers/id/12", xml).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Requests are never retried. Each raw verb is exactly one round trip.

mod errors;
mod http_request;
mod http_response;
mod session;
mod transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError, TransportError};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, MAX_ERROR_DETAIL_LEN};
pub use session::{Session, SDK_VERSION};
pub use transport::{ReqwestTransport, Transport, TransportRequest};
