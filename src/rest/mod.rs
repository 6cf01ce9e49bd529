//! Typed object access over the JSS Classic API.
//!
//! This module turns raw HTTP/XML exchanges into one uniform set of
//! resource operations that works for every registered kind:
//!
//! - **[`ResourceKind`]**: the registry of kinds, each resolving to a
//!   [`KindSpec`] (path segment, root tag, id and name paths, fields)
//! - **[`ResourceObject`]**: one object of a kind, with `fetch`,
//!   `fetch_by_name`, `create`, `save`, `update` and `delete`
//! - **[`Listing`]**: the id and name index of all objects of a kind
//! - **Path building**: [`build_path`] for each [`ResourceOperation`]
//! - **[`ResourceError`]**: semantic errors for resource operations
//!
//! # Example
//!
//! ```rust,ignore
//! use jss_api::rest::{ResourceKind, ResourceObject};
//!
//! // Index every computer group
//! let groups = ResourceObject::list(&session, ResourceKind::ComputerGroup).await?;
//! for group in groups.iter() {
//!     println!("{}: {}", group.id, group.name);
//! }
//!
//! // Fetch one and inspect declared fields
//! let group = ResourceObject::fetch(&session, ResourceKind::ComputerGroup, groups[0].id).await?;
//! println!("smart: {:?}", group.field("is_smart")?);
//!
//! // Create a policy from a template, then remove it
//! let mut policy = ResourceObject::create(&session, ResourceKind::Policy, &template).await?;
//! println!("created policy {:?}", policy.id());
//! policy.delete(&session).await?;
//! ```

mod errors;
mod kind;
mod listing;
mod object;
mod path;

// Public exports
pub use errors::ResourceError;
pub use kind::{FieldSpec, KindSpec, ResourceKind, UnknownKind};
pub use listing::{Listing, ListingEntry};
pub use object::ResourceObject;
pub use path::{build_path, ResourceOperation, CREATE_ID};
