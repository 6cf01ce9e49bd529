//! # JSS API Rust Client
//!
//! A Rust client for the JSS (Jamf Software Server) Classic API, providing
//! type-safe configuration, authenticated sessions, and uniform typed access
//! to the server's XML resources.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`JssConfig`] and [`JssConfigBuilder`]
//! - Validated newtypes for the server URL and API credentials
//! - Pluggable credential sources: [`Credentials`], [`EnvCredentials`],
//!   and the [`JssPrefs`] preferences document
//! - An async [`Session`] exposing raw `GET`/`POST`/`PUT`/`DELETE` verbs with
//!   HTTP Basic authentication and typed error mapping
//! - One generic [`ResourceObject`] for every [`ResourceKind`], with list,
//!   fetch, create, update and delete
//! - A small XML element tree in [`xml`]
//!
//! ## Quick Start
//!
//! ```rust
//! use jss_api::{JssConfig, JssUrl, Password, Username};
//!
//! let config = JssConfig::builder()
//!     .url(JssUrl::new("https://jss.example.com:8443").unwrap())
//!     .user(Username::new("api").unwrap())
//!     .password(Password::new("secret").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.url().api_root(), "https://jss.example.com:8443/JSSResource");
//! ```
//!
//! ## Loading Credentials
//!
//! Credentials come from any [`CredentialSource`]. A missing value is
//! reported as [`ConfigError::PreferencesMissingKey`] before any request is
//! made:
//!
//! ```rust
//! use jss_api::{ConfigError, JssConfig, JssPrefs};
//!
//! let prefs = JssPrefs::new("/nonexistent_path");
//! assert!(matches!(
//!     JssConfig::from_source(&prefs),
//!     Err(ConfigError::PreferencesMissingKey { .. })
//! ));
//! ```
//!
//! ## Working With Resources
//!
//! ```rust,ignore
//! use jss_api::{EnvCredentials, ResourceKind, ResourceObject, Session};
//!
//! let session = Session::from_source(&EnvCredentials::new())?;
//!
//! // List every policy
//! let policies = ResourceObject::list(&session, ResourceKind::Policy).await?;
//! println!("{} policies", policies.len());
//!
//! // Fetch, edit and save one
//! let mut policy = ResourceObject::fetch(&session, ResourceKind::Policy, policies[0].id).await?;
//! policy.set_field("enabled", "false")?;
//! policy.save(&session).await?;
//!
//! // Print any object as indented XML
//! println!("{}", policy.pretty_print()?);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Every operation borrows a [`Session`] explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Sessions, configs and objects are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **One round trip per call**: No caching, no retries

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod xml;

// Re-export public types at crate root for convenience
pub use config::{
    CredentialSource, Credentials, EnvCredentials, JssConfig, JssConfigBuilder, JssPrefs, JssUrl,
    Password, Username,
};
pub use error::ConfigError;

// Re-export session types
pub use clients::{
    HttpError, HttpMethod, HttpResponse, HttpResponseError, ReqwestTransport, Session, Transport,
    TransportError,
};

// Re-export resource types
pub use rest::{Listing, ListingEntry, ResourceError, ResourceKind, ResourceObject};
