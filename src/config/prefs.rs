//! Credential sources.
//!
//! A [`CredentialSource`] yields the three values a session needs: the JSS
//! URL, the API user and its password. The client depends only on the trait;
//! this module ships three implementations:
//!
//! - [`Credentials`]: values supplied directly by the caller
//! - [`EnvCredentials`]: `{PREFIX}_URL`, `{PREFIX}_USER`, `{PREFIX}_PASSWORD`
//! - [`JssPrefs`]: a JSON preferences document with `jss_url`, `jss_user`
//!   and `jss_pass` keys
//!
//! A missing value is always reported as
//! [`ConfigError::PreferencesMissingKey`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::{JssUrl, Password, Username};
use crate::error::ConfigError;

/// Preferences key holding the server URL.
pub const URL_KEY: &str = "jss_url";
/// Preferences key holding the API user.
pub const USER_KEY: &str = "jss_user";
/// Preferences key holding the API password.
pub const PASSWORD_KEY: &str = "jss_pass";

/// Validated connection credentials.
///
/// # Example
///
/// ```rust
/// use jss_api::config::{Credentials, CredentialSource};
///
/// let credentials = Credentials::new("https://jss.example.com", "api", "secret").unwrap();
/// assert_eq!(credentials.user().as_ref(), "api");
///
/// // Credentials are themselves a source
/// let loaded = credentials.load().unwrap();
/// assert_eq!(loaded, credentials);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    url: JssUrl,
    user: Username,
    password: Password,
}

impl Credentials {
    /// Creates validated credentials from raw strings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any value is empty or the URL is invalid.
    pub fn new(
        url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            url: JssUrl::new(url)?,
            user: Username::new(user)?,
            password: Password::new(password)?,
        })
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

    /// Builds credentials from optional raw values, reporting the first
    /// absent or blank one under `keys` (url, user, password order).
    fn from_parts(
        url: Option<String>,
        user: Option<String>,
        password: Option<String>,
        keys: [&str; 3],
    ) -> Result<Self, ConfigError> {
        let require = |value: Option<String>, key: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::PreferencesMissingKey {
                    key: key.to_string(),
                })
        };

        let url = require(url, keys[0])?;
        let user = require(user, keys[1])?;
        let password = require(password, keys[2])?;

        Self::new(url, user, password)
    }
}

/// A provider of connection credentials.
///
/// Implement this trait to read credentials from a platform settings store,
/// a secrets manager, or anything else.
pub trait CredentialSource {
    /// Loads the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PreferencesMissingKey`] when a required value
    /// is absent, or another [`ConfigError`] when a value is invalid.
    fn load(&self) -> Result<Credentials, ConfigError>;
}

impl CredentialSource for Credentials {
    fn load(&self) -> Result<Credentials, ConfigError> {
        Ok(self.clone())
    }
}

/// Credentials read from environment variables.
///
/// With the default prefix `JSS` the variables are `JSS_URL`, `JSS_USER`
/// and `JSS_PASSWORD`.
///
/// # Example
///
/// ```rust
/// use jss_api::config::{CredentialSource, EnvCredentials};
///
/// let source = EnvCredentials::with_prefix("DOCTEST_JSS_UNSET");
/// assert!(source.load().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct EnvCredentials {
    prefix: String,
}

impl EnvCredentials {
    /// Creates a source using the `JSS_` variables.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix("JSS")
    }

    /// Creates a source using `{prefix}_URL`, `{prefix}_USER` and `{prefix}_PASSWORD`.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn var_name(&self, suffix: &str) -> String {
        format!("{}_{suffix}", self.prefix)
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentials {
    fn load(&self) -> Result<Credentials, ConfigError> {
        let url_var = self.var_name("URL");
        let user_var = self.var_name("USER");
        let password_var = self.var_name("PASSWORD");

        Credentials::from_parts(
            std::env::var(&url_var).ok(),
            std::env::var(&user_var).ok(),
            std::env::var(&password_var).ok(),
            [url_var.as_str(), user_var.as_str(), password_var.as_str()],
        )
    }
}

/// On-disk shape of the preferences document.
#[derive(Debug, Default, Deserialize)]
struct PrefsDocument {
    jss_url: Option<String>,
    jss_user: Option<String>,
    jss_pass: Option<String>,
}

/// Credentials read from a JSON preferences document.
///
/// The document is an object with `jss_url`, `jss_user` and `jss_pass`
/// string keys. A document that does not exist holds no keys, so loading it
/// fails with [`ConfigError::PreferencesMissingKey`].
///
/// ```json
/// {
///   "jss_url": "https://jss.example.com:8443",
///   "jss_user": "api",
///   "jss_pass": "secret"
/// }
/// ```
#[derive(Clone, Debug)]
pub struct JssPrefs {
    path: PathBuf,
}

impl JssPrefs {
    /// Name of the preferences document inside the default directory.
    pub const FILE_NAME: &'static str = "org.da.jss_helper.json";

    /// Creates a source reading the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a source reading `$HOME/.config/jss_helper/org.da.jss_helper.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPreferences`] if `HOME` is not set.
    pub fn default_location() -> Result<Self, ConfigError> {
        let home = std::env::var_os("HOME").ok_or_else(|| ConfigError::InvalidPreferences {
            path: "$HOME".to_string(),
            reason: "HOME is not set".to_string(),
        })?;
        Ok(Self::new(
            PathBuf::from(home)
                .join(".config")
                .join("jss_helper")
                .join(Self::FILE_NAME),
        ))
    }

    /// Returns the location of the preferences document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<PrefsDocument, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidPreferences {
            path: self.path.display().to_string(),
            reason,
        };

        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No preferences document at {}", self.path.display());
                return Ok(PrefsDocument::default());
            }
            Err(e) => return Err(invalid(e.to_string())),
        };

        serde_json::from_str(&contents).map_err(|e| invalid(e.to_string()))
    }
}

impl CredentialSource for JssPrefs {
    fn load(&self) -> Result<Credentials, ConfigError> {
        let document = self.read_document()?;
        Credentials::from_parts(
            document.jss_url,
            document.jss_user,
            document.jss_pass,
            [URL_KEY, USER_KEY, PASSWORD_KEY],
        )
    }
}
