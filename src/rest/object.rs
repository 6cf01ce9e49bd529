//! The generic resource object.
//!
//! A [`ResourceObject`] is one instance of a [`ResourceKind`]: the kind tag,
//! its XML document, and the lifecycle state the client tracks around it.
//! Every kind shares the same lifecycle (list, fetch, mutate, persist,
//! delete); kinds differ only in their registry entry and field table.
//!
//! # Lifecycle
//!
//! | State | How | Server operations |
//! |---|---|---|
//! | new | [`ResourceObject::new`], [`ResourceObject::from_xml`] | `save` / `create` |
//! | persisted | `fetch`, `fetch_by_name`, `create`, `save` | `update`, `delete`, `save` |
//! | deleted | `delete` | none ([`ResourceError::Deleted`]) |
//!
//! Local edits mark the object dirty; nothing is sent until `save` or
//! `update` is called.
//!
//! # Example
//!
//! ```rust,ignore
//! use jss_api::rest::{ResourceKind, ResourceObject};
//!
//! let mut policy = ResourceObject::fetch(&session, ResourceKind::Policy, 42).await?;
//! policy.set_field("enabled", "false")?;
//! policy.save(&session).await?;
//!
//! let mut category = ResourceObject::new(ResourceKind::Category);
//! category.set_field("name", "Browsers")?;
//! category.save(&session).await?;
//! println!("Created category {:?}", category.id());
//!
//! category.delete(&session).await?;
//! ```

use crate::clients::{Session, Transport};
use crate::rest::errors::ResourceError;
use crate::rest::kind::{FieldSpec, KindSpec, ResourceKind};
use crate::rest::listing::Listing;
use crate::rest::path::{send, ResourceOperation};
use crate::xml::Element;

/// One object of a resource kind, backed by its XML document.
///
/// # Thread Safety
///
/// `ResourceObject` is `Send + Sync`. It holds no session; every server
/// operation borrows one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceObject {
    kind: ResourceKind,
    id: Option<u64>,
    document: Element,
    dirty: bool,
    deleted: bool,
}

// Verify ResourceObject is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceObject>();
};

impl ResourceObject {
    /// Creates an unsaved object with an empty document.
    #[must_use]
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            id: None,
            document: Element::new(kind.spec().root_tag),
            dirty: true,
            deleted: false,
        }
    }

    /// Wraps a document as an unsaved object of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::RootMismatch`] if the root element is not
    /// the kind's root tag.
    pub fn from_element(kind: ResourceKind, document: Element) -> Result<Self, ResourceError> {
        check_root(kind, &document)?;
        Ok(Self {
            kind,
            id: None,
            document,
            dirty: true,
            deleted: false,
        })
    }

    /// Parses XML into an unsaved object of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Xml`] for malformed input and
    /// [`ResourceError::RootMismatch`] for a document of another kind.
    pub fn from_xml(kind: ResourceKind, xml: &str) -> Result<Self, ResourceError> {
        Self::from_element(kind, Element::parse(xml)?)
    }

    /// Lists every object of `kind`.
    ///
    /// # Errors
    ///
    /// See [`Listing::fetch`].
    pub async fn list<T: Transport>(
        session: &Session<T>,
        kind: ResourceKind,
    ) -> Result<Listing, ResourceError> {
        Listing::fetch(session, kind).await
    }

    /// Fetches one object by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if no such object exists,
    /// [`ResourceError::RootMismatch`] if the server returned a document of
    /// another kind, or [`ResourceError::Http`] for other session failures.
    pub async fn fetch<T: Transport>(
        session: &Session<T>,
        kind: ResourceKind,
        id: u64,
    ) -> Result<Self, ResourceError> {
        let id_label = id.to_string();
        let body = send(session, kind, ResourceOperation::Find { id }, None)
            .await
            .map_err(|e| ResourceError::from_http_error(e, kind.name(), Some(id_label.as_str())))?;

        let document = Element::parse(&body)?;
        check_root(kind, &document)?;
        let id = read_id(kind.spec(), &document).unwrap_or(id);

        Ok(Self::persisted(kind, id, document))
    }

    /// Fetches one object by name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if no object has that name, and
    /// [`ResourceError::MissingId`] if the returned document carries no id.
    pub async fn fetch_by_name<T: Transport>(
        session: &Session<T>,
        kind: ResourceKind,
        name: &str,
    ) -> Result<Self, ResourceError> {
        let body = send(session, kind, ResourceOperation::FindByName { name }, None)
            .await
            .map_err(|e| ResourceError::from_http_error(e, kind.name(), Some(name)))?;

        let document = Element::parse(&body)?;
        check_root(kind, &document)?;
        let spec = kind.spec();
        let id = read_id(spec, &document).ok_or(ResourceError::MissingId {
            resource: kind.name(),
            path: spec.id_path,
        })?;

        Ok(Self::persisted(kind, id, document))
    }

    /// Creates a new object on the server from an XML document.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Xml`] or [`ResourceError::RootMismatch`]
    /// for a bad document (before any request),
    /// [`ResourceError::ValidationFailed`] if the server rejects it, and
    /// [`ResourceError::MissingCreatedId`] if the reply has no id.
    pub async fn create<T: Transport>(
        session: &Session<T>,
        kind: ResourceKind,
        xml: &str,
    ) -> Result<Self, ResourceError> {
        let mut object = Self::from_xml(kind, xml)?;
        object.post(session).await?;
        Ok(object)
    }

    /// Creates the object when it is new, otherwise updates it.
    ///
    /// # Errors
    ///
    /// See [`ResourceObject::create`] and [`ResourceObject::update`].
    pub async fn save<T: Transport>(&mut self, session: &Session<T>) -> Result<(), ResourceError> {
        self.ensure_not_deleted()?;
        if self.id.is_none() {
            self.post(session).await
        } else {
            self.update(session).await
        }
    }

    /// Replaces the server copy with the current document.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotPersisted`] without a request if the
    /// object was never created, and [`ResourceError::Deleted`] after a
    /// delete.
    pub async fn update<T: Transport>(
        &mut self,
        session: &Session<T>,
    ) -> Result<(), ResourceError> {
        let id = self.require_id("update")?;
        let body = self.document.to_xml()?;
        let id_label = id.to_string();

        send(session, self.kind, ResourceOperation::Update { id }, Some(body))
            .await
            .map_err(|e| {
                ResourceError::from_http_error(e, self.kind.name(), Some(id_label.as_str()))
            })?;

        self.dirty = false;
        tracing::debug!("Updated {} {}", self.kind, id);
        Ok(())
    }

    /// Deletes the object from the server.
    ///
    /// After success the object is marked deleted and every further server
    /// operation fails with [`ResourceError::Deleted`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotPersisted`] without a request if the
    /// object was never created, and [`ResourceError::NotFound`] if the
    /// server no longer has it.
    pub async fn delete<T: Transport>(
        &mut self,
        session: &Session<T>,
    ) -> Result<(), ResourceError> {
        let id = self.require_id("delete")?;
        let id_label = id.to_string();

        send(session, self.kind, ResourceOperation::Delete { id }, None)
            .await
            .map_err(|e| {
                ResourceError::from_http_error(e, self.kind.name(), Some(id_label.as_str()))
            })?;

        self.deleted = true;
        tracing::debug!("Deleted {} {}", self.kind, id);
        Ok(())
    }

    /// Returns the kind of this object.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns the server id, or `None` while the object is new.
    #[must_use]
    pub const fn id(&self) -> Option<u64> {
        self.id
    }

    /// Returns the object name, read from the kind's name path.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.document.text_at(self.kind.spec().name_path)
    }

    /// Returns `true` if the object has not been created on the server.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Returns `true` if the document has unsaved changes.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns `true` once the object has been deleted from the server.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns the underlying document.
    #[must_use]
    pub const fn document(&self) -> &Element {
        &self.document
    }

    /// Consumes the object, returning its document.
    #[must_use]
    pub fn into_document(self) -> Element {
        self.document
    }

    /// Reads a declared field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownField`] if the kind does not declare
    /// `name`.
    pub fn field(&self, name: &str) -> Result<Option<&str>, ResourceError> {
        let spec = self.field_spec(name)?;
        Ok(self.document.text_at(spec.path))
    }

    /// Sets a declared field, creating its elements if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownField`] if the kind does not declare
    /// `name`.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), ResourceError> {
        let spec = self.field_spec(name)?;
        self.set_text(spec.path, value);
        Ok(())
    }

    /// Reads the trimmed text at a slash-separated path.
    #[must_use]
    pub fn text(&self, path: &str) -> Option<&str> {
        self.document.text_at(path)
    }

    /// Sets the text at a slash-separated path and marks the object dirty.
    pub fn set_text(&mut self, path: &str, value: impl Into<String>) {
        self.document.set_text_at(path, value);
        self.dirty = true;
    }

    /// Reads an attribute of the element at `path`.
    #[must_use]
    pub fn attribute(&self, path: &str, attribute: &str) -> Option<&str> {
        self.document.find(path)?.attribute(attribute)
    }

    /// Sets an attribute of the element at `path`, creating the element if
    /// needed, and marks the object dirty.
    pub fn set_attribute(&mut self, path: &str, attribute: &str, value: impl Into<String>) {
        self.document
            .find_or_create(path)
            .set_attribute(attribute, value);
        self.dirty = true;
    }

    /// Renders the document as indented XML.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Xml`] if serialisation fails.
    pub fn pretty_print(&self) -> Result<String, ResourceError> {
        Ok(self.document.to_pretty_xml()?)
    }

    /// Serialises the document as sent in request bodies.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Xml`] if serialisation fails.
    pub fn to_xml(&self) -> Result<String, ResourceError> {
        Ok(self.document.to_xml()?)
    }

    fn persisted(kind: ResourceKind, id: u64, document: Element) -> Self {
        Self {
            kind,
            id: Some(id),
            document,
            dirty: false,
            deleted: false,
        }
    }

    fn field_spec(&self, name: &str) -> Result<&'static FieldSpec, ResourceError> {
        self.kind
            .spec()
            .field(name)
            .ok_or_else(|| ResourceError::UnknownField {
                resource: self.kind.name(),
                field: name.to_string(),
            })
    }

    fn ensure_not_deleted(&self) -> Result<(), ResourceError> {
        match (self.deleted, self.id) {
            (true, Some(id)) => Err(ResourceError::Deleted {
                resource: self.kind.name(),
                id,
            }),
            _ => Ok(()),
        }
    }

    fn require_id(&self, operation: &'static str) -> Result<u64, ResourceError> {
        self.ensure_not_deleted()?;
        self.id.ok_or(ResourceError::NotPersisted {
            resource: self.kind.name(),
            operation,
        })
    }

    /// POSTs the document and adopts the id from the reply.
    async fn post<T: Transport>(&mut self, session: &Session<T>) -> Result<(), ResourceError> {
        let body = self.document.to_xml()?;

        let reply = send(session, self.kind, ResourceOperation::Create, Some(body))
            .await
            .map_err(|e| ResourceError::from_http_error(e, self.kind.name(), None))?;

        let id_path = session.config().created_id_path();
        let id = Element::parse(&reply)
            .ok()
            .and_then(|root| parse_id(root.text_at(id_path)))
            .ok_or_else(|| ResourceError::MissingCreatedId {
                resource: self.kind.name(),
                path: id_path.to_string(),
            })?;

        self.document
            .set_text_at(self.kind.spec().id_path, id.to_string());
        self.id = Some(id);
        self.dirty = false;
        tracing::debug!("Created {} {}", self.kind, id);
        Ok(())
    }
}

fn check_root(kind: ResourceKind, document: &Element) -> Result<(), ResourceError> {
    let expected = kind.spec().root_tag;
    if document.name() == expected {
        Ok(())
    } else {
        Err(ResourceError::RootMismatch {
            resource: kind.name(),
            expected,
            found: document.name().to_string(),
        })
    }
}

fn read_id(spec: &KindSpec, document: &Element) -> Option<u64> {
    parse_id(document.text_at(spec.id_path))
}

fn parse_id(text: Option<&str>) -> Option<u64> {
    text?.parse::<u64>().ok().filter(|id| *id > 0)
}
