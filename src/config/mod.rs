//! Configuration types for the JSS API client.
//!
//! This module provides the configuration used to open a
//! [`Session`](crate::clients::Session) against a JSS.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`JssConfig`]: The main configuration struct holding all client settings
//! - [`JssConfigBuilder`]: A builder for constructing [`JssConfig`] instances
//! - [`JssUrl`]: A validated server URL
//! - [`Username`] and [`Password`]: Validated API account credentials
//! - [`CredentialSource`]: Pluggable providers of credentials, with
//!   [`Credentials`], [`EnvCredentials`] and [`JssPrefs`] implementations
//!
//! # Example
//!
//! ```rust
//! use jss_api::{JssConfig, JssUrl, Password, Username};
//! use std::time::Duration;
//!
//! let config = JssConfig::builder()
//!     .url(JssUrl::new("https://jss.example.com:8443").unwrap())
//!     .user(Username::new("api").unwrap())
//!     .password(Password::new("secret").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod prefs;

pub use newtypes::{JssUrl, Password, Username};
pub use prefs::{
    CredentialSource, Credentials, EnvCredentials, JssPrefs, PASSWORD_KEY, URL_KEY, USER_KEY,
};

use std::time::Duration;

use crate::error::ConfigError;

/// Default location of the new object's id inside a create reply.
///
/// The JSS answers `POST /{kind}/id/0` with `<{root}><id>N</id></{root}>`.
pub const DEFAULT_CREATED_ID_PATH: &str = "id";

/// Configuration for the JSS API client.
///
/// # Thread Safety
///
/// `JssConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use jss_api::config::{Credentials, JssConfig};
///
/// let credentials = Credentials::new("https://jss.example.com", "api", "secret").unwrap();
/// let config = JssConfig::from_source(&credentials).unwrap();
///
/// assert_eq!(config.url().as_ref(), "https://jss.example.com");
/// assert!(config.ssl_verify());
/// ```
#[derive(Clone, Debug)]
pub struct JssConfig {
    url: JssUrl,
    user: Username,
    password: Password,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    ssl_verify: bool,
    created_id_path: String,
}

impl JssConfig {
    /// Creates a new builder for constructing a `JssConfig`.
    #[must_use]
    pub fn builder() -> JssConfigBuilder {
        JssConfigBuilder::new()
    }

    /// Builds a configuration with default settings from a credential source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PreferencesMissingKey`] if the source lacks a
    /// required value.
    pub fn from_source(source: &impl CredentialSource) -> Result<Self, ConfigError> {
        JssConfigBuilder::from_credentials(source.load()?).build()
    }

    /// Returns the server URL.
    #[must_use]
    pub const fn url(&self) -> &JssUrl {
        &self.url
    }

    /// Returns the API user.
    #[must_use]
    pub const fn user(&self) -> &Username {
        &self.user
    }

    /// Returns the API password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn ssl_verify(&self) -> bool {
        self.ssl_verify
    }

    /// Returns the slash-separated element path holding the id in create replies.
    #[must_use]
    pub fn created_id_path(&self) -> &str {
        &self.created_id_path
    }
}

// Verify JssConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JssConfig>();
};

/// Builder for constructing [`JssConfig`] instances.
///
/// Required fields are `url`, `user` and `password`.
///
/// # Defaults
///
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (transport default)
/// - `ssl_verify`: `true`
/// - `created_id_path`: `"id"`
#[derive(Debug, Default)]
pub struct JssConfigBuilder {
    url: Option<JssUrl>,
    user: Option<Username>,
    password: Option<Password>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    ssl_verify: Option<bool>,
    created_id_path: Option<String>,
}

impl JssConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-populated with validated credentials.
    #[must_use]
    pub fn from_credentials(credentials: Credentials) -> Self {
        Self::new()
            .url(credentials.url().clone())
            .user(credentials.user().clone())
            .password(credentials.password().clone())
    }

    /// Sets the server URL (required).
    #[must_use]
    pub fn url(mut self, url: JssUrl) -> Self {
        self.url = Some(url);
        self
    }

    /// Sets the API user (required).
    #[must_use]
    pub fn user(mut self, user: Username) -> Self {
        self.user = Some(user);
        self
    }

    /// Sets the API password (required).
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets whether TLS certificates are verified.
    ///
    /// Many on-premise JSS installs use self-signed certificates; disabling
    /// verification accepts them.
    #[must_use]
    pub const fn ssl_verify(mut self, verify: bool) -> Self {
        self.ssl_verify = Some(verify);
        self
    }

    /// Sets the element path, relative to the reply root, holding the id
    /// the server assigns on create.
    #[must_use]
    pub fn created_id_path(mut self, path: impl Into<String>) -> Self {
        self.created_id_path = Some(path.into());
        self
    }

    /// Builds the [`JssConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `url`, `user` or
    /// `password` are not set, and [`ConfigError::EmptyCreatedIdPath`] if
    /// the created id path is blank.
    pub fn build(self) -> Result<JssConfig, ConfigError> {
        let url = self
            .url
            .ok_or(ConfigError::MissingRequiredField { field: "url" })?;
        let user = self
            .user
            .ok_or(ConfigError::MissingRequiredField { field: "user" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;

        let created_id_path = match self.created_id_path {
            Some(path) => {
                let path = path.trim().trim_matches('/').to_string();
                if path.is_empty() {
                    return Err(ConfigError::EmptyCreatedIdPath);
                }
                path
            }
            None => DEFAULT_CREATED_ID_PATH.to_string(),
        };

        Ok(JssConfig {
            url,
            user,
            password,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            ssl_verify: self.ssl_verify.unwrap_or(true),
            created_id_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> JssConfigBuilder {
        JssConfig::builder()
            .url(JssUrl::new("https://jss.example.com").unwrap())
            .user(Username::new("api").unwrap())
            .password(Password::new("secret").unwrap())
    }

    #[test]
    fn test_builder_requires_url() {
        let result = JssConfigBuilder::new()
            .user(Username::new("api").unwrap())
            .password(Password::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "url" })
        ));
    }

    #[test]
    fn test_builder_requires_password() {
        let result = JssConfigBuilder::new()
            .url(JssUrl::new("https://jss.example.com").unwrap())
            .user(Username::new("api").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "password" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = complete_builder().build().unwrap();

        assert!(config.ssl_verify());
        assert!(config.timeout().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.created_id_path(), DEFAULT_CREATED_ID_PATH);
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = complete_builder()
            .user_agent_prefix("Munki/6.0")
            .timeout(Duration::from_secs(10))
            .ssl_verify(false)
            .created_id_path("general/id")
            .build()
            .unwrap();

        assert_eq!(config.user_agent_prefix(), Some("Munki/6.0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert!(!config.ssl_verify());
        assert_eq!(config.created_id_path(), "general/id");
    }

    #[test]
    fn test_builder_rejects_blank_created_id_path() {
        let result = complete_builder().created_id_path(" / ").build();
        assert!(matches!(result, Err(ConfigError::EmptyCreatedIdPath)));
    }

    #[test]
    fn test_from_source_propagates_missing_key() {
        let prefs = JssPrefs::new("/nonexistent_path");
        let result = JssConfig::from_source(&prefs);
        assert!(matches!(
            result,
            Err(ConfigError::PreferencesMissingKey { .. })
        ));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JssConfig>();
    }

    #[test]
    fn test_config_debug_masks_password() {
        let config = complete_builder().build().unwrap();
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("JssConfig"));
        assert!(!debug_str.contains("secret"));
    }
}
