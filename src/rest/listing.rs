//! Listings: the id and name index of every object of a kind.
//!
//! A listing document holds one child per object, each with `<id>` and
//! `<name>`. Other children (the JSS adds a `<size>` element) are skipped:
//!
//! ```xml
//! <policies>
//!   <size>2</size>
//!   <policy><id>1</id><name>Install Firefox</name></policy>
//!   <policy><id>4</id><name>Update Inventory</name></policy>
//! </policies>
//! ```
//!
//! [`Listing`] implements `Deref<Target = [ListingEntry]>`, so it can be
//! iterated, indexed and measured like a slice.

use std::ops::Deref;

use crate::clients::{Session, Transport};
use crate::rest::errors::ResourceError;
use crate::rest::kind::ResourceKind;
use crate::rest::path::{send, ResourceOperation};
use crate::xml::Element;

/// One object in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// The server-assigned id, always greater than zero.
    pub id: u64,
    /// The object name.
    pub name: String,
}

/// Every object of one kind, in server order.
///
/// # Example
///
/// ```rust
/// use jss_api::rest::{Listing, ResourceKind};
///
/// let listing = Listing::from_xml(
///     ResourceKind::Category,
///     "<categories><size>1</size><category><id>3</id><name>Browsers</name></category></categories>",
/// ).unwrap();
///
/// assert_eq!(listing.len(), 1);
/// assert_eq!(listing[0].id, 3);
/// assert_eq!(listing.find_by_name("Browsers").map(|e| e.id), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    kind: ResourceKind,
    entries: Vec<ListingEntry>,
}

impl Listing {
    /// Fetches the listing for `kind` from the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for session failures,
    /// [`ResourceError::Xml`] for a malformed body, and
    /// [`ResourceError::InvalidListing`] for a zero or non-numeric id.
    pub async fn fetch<T: Transport>(
        session: &Session<T>,
        kind: ResourceKind,
    ) -> Result<Self, ResourceError> {
        let body = send(session, kind, ResourceOperation::All, None)
            .await
            .map_err(|e| ResourceError::from_http_error(e, kind.name(), None))?;

        let listing = Self::from_xml(kind, &body)?;
        tracing::debug!("Listed {} {} objects", listing.len(), kind);
        Ok(listing)
    }

    /// Parses a listing document.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Xml`] if the body is not well-formed and
    /// [`ResourceError::InvalidListing`] if an entry id is not a positive
    /// integer.
    pub fn from_xml(kind: ResourceKind, body: &str) -> Result<Self, ResourceError> {
        let root = Element::parse(body)?;
        let entries = root
            .children()
            .iter()
            .filter_map(|child| Some((child.text_at("id")?, child.text_at("name")?)))
            .map(|(id, name)| {
                let id = id
                    .parse::<u64>()
                    .ok()
                    .filter(|id| *id > 0)
                    .ok_or_else(|| ResourceError::InvalidListing {
                        resource: kind.name(),
                        reason: format!("entry '{name}' has invalid id '{id}'"),
                    })?;
                Ok(ListingEntry {
                    id,
                    name: name.to_string(),
                })
            })
            .collect::<Result<Vec<_>, ResourceError>>()?;

        Ok(Self { kind, entries })
    }

    /// Returns the kind this listing covers.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns the entry with the given id.
    #[must_use]
    pub fn find_by_id(&self, id: u64) -> Option<&ListingEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Returns the first entry with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&ListingEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns all ids in server order.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Consumes the listing, returning its entries.
    #[must_use]
    pub fn into_inner(self) -> Vec<ListingEntry> {
        self.entries
    }
}

impl Deref for Listing {
    type Target = [ListingEntry];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = &'a ListingEntry;
    type IntoIter = std::slice::Iter<'a, ListingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// Verify Listing is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Listing>();
};
