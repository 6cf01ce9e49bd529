//! The HTTP transport seam.
//!
//! A [`Session`](crate::clients::Session) never talks to the network
//! directly; it hands a fully prepared [`TransportRequest`] to a
//! [`Transport`] and maps the returned [`HttpResponse`]. The default
//! implementation is [`ReqwestTransport`].

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;

/// A fully resolved request: absolute URL and final headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute request URL.
    pub url: String,
    /// Headers to send, including authentication.
    pub headers: HashMap<String, String>,
    /// The request body, if any.
    pub body: Option<String>,
}

/// Executes HTTP requests on behalf of a session.
///
/// Implementations return every response the server produced, including
/// non-2xx ones; only failures to obtain a response are errors.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use jss_api::clients::{HttpResponse, Transport, TransportError, TransportRequest};
///
/// struct Offline;
///
/// impl Transport for Offline {
///     async fn execute(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
///         Err(TransportError::Connection {
///             message: format!("offline: {}", request.url),
///         })
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the server's response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response could be obtained.
    async fn execute(&self, request: TransportRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client using rustls.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with an optional per-request timeout.
    ///
    /// With `ssl_verify` set to `false` invalid certificates are accepted,
    /// which self-signed JSS installs need.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the TLS backend cannot be
    /// initialised.
    pub fn new(timeout: Option<Duration>, ssl_verify: bool) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(!ssl_verify);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await?;
        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(code, headers, body))
    }
}
