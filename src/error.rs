//! Configuration error types for the JSS API client.
//!
//! This module contains the error type raised while loading credentials and
//! building a [`JssConfig`](crate::JssConfig). Every variant is produced
//! before any network call is attempted.
//!
//! # Example
//!
//! ```rust
//! use jss_api::{ConfigError, Username};
//!
//! let result = Username::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyUser)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key is absent from the credential source.
    ///
    /// This is the error raised when the preferences store, the environment
    /// or any other [`CredentialSource`](crate::config::CredentialSource)
    /// lacks one of the URL, user or password values.
    #[error("Missing required preferences key '{key}'. Set it in the credential source before connecting.")]
    PreferencesMissingKey {
        /// The name of the missing key (e.g., `jss_user`).
        key: String,
    },

    /// The preferences document exists but could not be read or parsed.
    #[error("Unable to read preferences at '{path}': {reason}")]
    InvalidPreferences {
        /// The location of the preferences document.
        path: String,
        /// Why the document was rejected.
        reason: String,
    },

    /// The JSS URL is invalid.
    #[error("Invalid JSS URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://jss.example.com:8443').")]
    InvalidUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The API user name cannot be empty.
    #[error("JSS user cannot be empty. Please provide the API account name.")]
    EmptyUser,

    /// The API password cannot be empty.
    #[error("JSS password cannot be empty. Please provide the API account password.")]
    EmptyPassword,

    /// The path used to locate the id in create replies is empty.
    #[error("Created id path cannot be empty.")]
    EmptyCreatedIdPath,

    /// A required builder field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The HTTP transport could not be initialised.
    #[error("Failed to initialise HTTP transport: {reason}")]
    TransportInit {
        /// The underlying failure.
        reason: String,
    },
}
