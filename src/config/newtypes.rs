//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// Path segment under which the JSS serves its Classic API.
const API_ROOT: &str = "/JSSResource";

/// A validated JSS server URL.
///
/// The URL must carry a scheme and a host. Trailing slashes are removed, and
/// so is a trailing `/JSSResource` segment, since the client appends that
/// itself.
///
/// # Example
///
/// ```rust
/// use jss_api::JssUrl;
///
/// let url = JssUrl::new("https://jss.example.com:8443/").unwrap();
/// assert_eq!(url.as_ref(), "https://jss.example.com:8443");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "jss.example.com");
/// assert_eq!(url.api_root(), "https://jss.example.com:8443/JSSResource");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JssUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl JssUrl {
    /// Creates a new validated JSS URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let mut url = raw.trim().trim_end_matches('/').to_string();
        if let Some(stripped) = url.strip_suffix(API_ROOT) {
            url = stripped.trim_end_matches('/').to_string();
        }

        let invalid = || ConfigError::InvalidUrl { url: raw.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start || remainder.contains(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns the base of every API request (`{url}/JSSResource`).
    #[must_use]
    pub fn api_root(&self) -> String {
        format!("{}{API_ROOT}", self.url)
    }
}

impl AsRef<str> for JssUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for JssUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A validated JSS API account name.
///
/// # Example
///
/// ```rust
/// use jss_api::Username;
///
/// let user = Username::new("api-reader").unwrap();
/// assert_eq!(user.as_ref(), "api-reader");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated user name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUser`] if the name is empty.
    pub fn new(user: impl Into<String>) -> Result<Self, ConfigError> {
        let user = user.into();
        if user.trim().is_empty() {
            return Err(ConfigError::EmptyUser);
        }
        Ok(Self(user))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated JSS API account password.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`.
///
/// # Example
///
/// ```rust
/// use jss_api::Password;
///
/// let password = Password::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "Password(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}
