//! Authenticated session against a JSS.
//!
//! This module provides the [`Session`] type: configuration plus a
//! [`Transport`], exposing the raw verbs every resource operation is built
//! on.

use std::collections::HashMap;
use std::fmt;

use base64::prelude::*;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{ReqwestTransport, Transport, TransportRequest};
use crate::config::{CredentialSource, JssConfig};
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// An authenticated connection to one JSS.
///
/// Every request carries HTTP Basic authentication derived from the
/// configured credentials; nothing is cached between calls. Paths are
/// relative to `{url}/JSSResource`.
///
/// The session handles:
/// - Base URI construction from the configured URL
/// - Default headers (`Authorization`, `Accept`, `User-Agent`)
/// - Mapping non-2xx responses onto [`HttpError`] variants
///
/// # Thread Safety
///
/// `Session` is `Send + Sync` whenever its transport is, so it can be shared
/// across async tasks behind an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use jss_api::{Credentials, Session};
///
/// let credentials = Credentials::new("https://jss.example.com:8443", "api", "secret")?;
/// let session = Session::from_source(&credentials)?;
///
/// let body = session.raw_get("/categories").await?;
/// println!("{body}");
/// ```
pub struct Session<T = ReqwestTransport> {
    transport: T,
    config: JssConfig,
    base_uri: String,
    default_headers: HashMap<String, String>,
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

impl Session<ReqwestTransport> {
    /// Opens a session using the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the HTTP client cannot be
    /// created.
    pub fn new(config: JssConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config.timeout(), config.ssl_verify()).map_err(
            |e| ConfigError::TransportInit {
                reason: e.to_string(),
            },
        )?;
        Ok(Self::with_transport(config, transport))
    }

    /// Opens a session with default settings from a credential source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the source lacks a value or the transport
    /// cannot be created.
    pub fn from_source(source: &impl CredentialSource) -> Result<Self, ConfigError> {
        Self::new(JssConfig::from_source(source)?)
    }
}

impl<T: Transport> Session<T> {
    /// Opens a session over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(config: JssConfig, transport: T) -> Self {
        let base_uri = config.url().api_root();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}JSS API Library v{SDK_VERSION} | Rust {rust_version}");

        let token = BASE64_STANDARD.encode(format!(
            "{}:{}",
            config.user().as_ref(),
            config.password().as_ref()
        ));

        let mut default_headers = HashMap::new();
        default_headers.insert("Authorization".to_string(), format!("Basic {token}"));
        default_headers.insert("Accept".to_string(), "application/xml".to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);

        Self {
            transport,
            config,
            base_uri,
            default_headers,
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &JssConfig {
        &self.config
    }

    /// Returns the API root every path is appended to.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a request and returns the successful response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No response is obtained (`Transport`)
    /// - The response status is not 2xx (mapped by [`HttpError::from_response`])
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}", self.base_uri, request.path);

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert(
                "Content-Type".to_string(),
                request.body_type.as_content_type().to_string(),
            );
        }

        tracing::debug!("JSS request: {} {}", request.http_method, url);

        let response = self
            .transport
            .execute(TransportRequest {
                method: request.http_method,
                url,
                headers,
                body: request.body,
            })
            .await
            .map_err(|e| {
                tracing::warn!("JSS request to {} failed: {}", request.path, e);
                HttpError::from(e)
            })?;

        if response.is_ok() {
            return Ok(response);
        }

        let error = HttpError::from_response(HttpResponseError {
            code: response.code,
            path: request.path,
            message: response.error_detail(),
        });
        tracing::warn!("JSS responded with an error: {}", error);
        Err(error)
    }

    /// Sends a GET and returns the response body.
    ///
    /// # Errors
    ///
    /// See [`Session::request`].
    pub async fn raw_get(&self, path: &str) -> Result<String, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        Ok(self.request(request).await?.body)
    }

    /// Sends a POST with an XML body and returns the response body.
    ///
    /// # Errors
    ///
    /// See [`Session::request`].
    pub async fn raw_post(&self, path: &str, body: impl Into<String>) -> Result<String, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(body)
            .build()?;
        Ok(self.request(request).await?.body)
    }

    /// Sends a PUT with an XML body and returns the response body.
    ///
    /// # Errors
    ///
    /// See [`Session::request`].
    pub async fn raw_put(&self, path: &str, body: impl Into<String>) -> Result<String, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Put, path)
            .body(body)
            .build()?;
        Ok(self.request(request).await?.body)
    }

    /// Sends a DELETE.
    ///
    /// # Errors
    ///
    /// See [`Session::request`]. Deleting an id that no longer exists is
    /// [`HttpError::NotFound`].
    pub async fn raw_delete(&self, path: &str) -> Result<(), HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path).build()?;
        self.request(request).await?;
        Ok(())
    }
}

impl<T> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_uri", &self.base_uri)
            .field("user", &self.config.user())
            .finish_non_exhaustive()
    }
}
