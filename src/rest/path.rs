//! Path building and dispatch for resource operations.
//!
//! All paths are relative to the API root (`{url}/JSSResource`):
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | list | GET | `/{segment}` |
//! | fetch, update, delete | GET, PUT, DELETE | `/{segment}/id/{id}` |
//! | create | POST | `/{segment}/id/0` |
//! | fetch by name | GET | `/{segment}/name/{name}` |
//!
//! # Example
//!
//! ```rust
//! use jss_api::rest::{build_path, ResourceKind, ResourceOperation};
//!
//! assert_eq!(
//!     build_path(ResourceKind::Computer, ResourceOperation::Find { id: 12 }),
//!     "/computers/id/12"
//! );
//! assert_eq!(
//!     build_path(ResourceKind::Policy, ResourceOperation::FindByName { name: "Install Office" }),
//!     "/policies/name/Install%20Office"
//! );
//! ```

use crate::clients::{HttpError, HttpMethod, HttpRequest, Session, Transport};
use crate::rest::kind::ResourceKind;

/// Id used in the create path; the server assigns the real one.
pub const CREATE_ID: u64 = 0;

/// Operations that can be performed on a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation<'a> {
    /// List every object of the kind.
    All,
    /// Fetch one object by id.
    Find {
        /// The object id.
        id: u64,
    },
    /// Fetch one object by name.
    FindByName {
        /// The object name, unencoded.
        name: &'a str,
    },
    /// Create a new object.
    Create,
    /// Replace an existing object.
    Update {
        /// The object id.
        id: u64,
    },
    /// Delete an existing object.
    Delete {
        /// The object id.
        id: u64,
    },
}

impl ResourceOperation<'_> {
    /// Returns the HTTP method for this operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::All | Self::Find { .. } | Self::FindByName { .. } => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update { .. } => HttpMethod::Put,
            Self::Delete { .. } => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Find { .. } => "find",
            Self::FindByName { .. } => "find_by_name",
            Self::Create => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Builds the request path for an operation on a kind.
///
/// Names are percent-encoded.
#[must_use]
pub fn build_path(kind: ResourceKind, operation: ResourceOperation<'_>) -> String {
    let segment = kind.spec().path_segment;
    match operation {
        ResourceOperation::All => format!("/{segment}"),
        ResourceOperation::Create => format!("/{segment}/id/{CREATE_ID}"),
        ResourceOperation::Find { id }
        | ResourceOperation::Update { id }
        | ResourceOperation::Delete { id } => format!("/{segment}/id/{id}"),
        ResourceOperation::FindByName { name } => {
            format!("/{segment}/name/{}", urlencoding::encode(name))
        }
    }
}

/// Sends `operation` with the verb it maps to and returns the response body.
pub(crate) async fn send<T: Transport>(
    session: &Session<T>,
    kind: ResourceKind,
    operation: ResourceOperation<'_>,
    body: Option<String>,
) -> Result<String, HttpError> {
    let mut builder = HttpRequest::builder(operation.http_method(), build_path(kind, operation));
    if let Some(body) = body {
        builder = builder.body(body);
    }

    tracing::debug!("{} {} ({})", kind, operation.as_str(), operation.http_method());
    Ok(session.request(builder.build()?).await?.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpResponse, TransportError, TransportRequest};
    use crate::config::{Credentials, JssConfig};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<TransportRequest>>,
    }

    impl Transport for Recorder {
        async fn execute(
            &self,
            request: TransportRequest,
        ) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse::new(200, HashMap::new(), "<ok/>"))
        }
    }

    fn session() -> Session<Recorder> {
        let credentials = Credentials::new("https://jss.example.com", "api", "secret").unwrap();
        Session::with_transport(
            JssConfig::from_source(&credentials).unwrap(),
            Recorder::default(),
        )
    }

    #[test]
    fn test_list_path() {
        assert_eq!(
            build_path(ResourceKind::MobileDeviceGroup, ResourceOperation::All),
            "/mobiledevicegroups"
        );
    }

    #[test]
    fn test_id_paths_share_shape() {
        let kind = ResourceKind::Category;
        assert_eq!(
            build_path(kind, ResourceOperation::Find { id: 7 }),
            "/categories/id/7"
        );
        assert_eq!(
            build_path(kind, ResourceOperation::Update { id: 7 }),
            "/categories/id/7"
        );
        assert_eq!(
            build_path(kind, ResourceOperation::Delete { id: 7 }),
            "/categories/id/7"
        );
    }

    #[test]
    fn test_create_path_uses_id_zero() {
        assert_eq!(
            build_path(ResourceKind::Policy, ResourceOperation::Create),
            "/policies/id/0"
        );
    }

    #[test]
    fn test_name_path_is_percent_encoded() {
        assert_eq!(
            build_path(
                ResourceKind::ComputerGroup,
                ResourceOperation::FindByName {
                    name: "All Managed/Clients & Labs"
                }
            ),
            "/computergroups/name/All%20Managed%2FClients%20%26%20Labs"
        );
    }

    #[test]
    fn test_operation_methods() {
        assert_eq!(ResourceOperation::All.http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::Create.http_method(), HttpMethod::Post);
        assert_eq!(
            ResourceOperation::Update { id: 1 }.http_method(),
            HttpMethod::Put
        );
        assert_eq!(
            ResourceOperation::Delete { id: 1 }.http_method(),
            HttpMethod::Delete
        );
        assert_eq!(ResourceOperation::Create.as_str(), "create");
    }

    #[tokio::test]
    async fn test_send_uses_operation_verb_and_path() {
        let session = session();
        let kind = ResourceKind::Script;
        let body = || Some("<script/>".to_string());

        send(&session, kind, ResourceOperation::All, None).await.unwrap();
        send(&session, kind, ResourceOperation::Create, body()).await.unwrap();
        send(&session, kind, ResourceOperation::Update { id: 3 }, body()).await.unwrap();
        let reply = send(&session, kind, ResourceOperation::Delete { id: 3 }, None)
            .await
            .unwrap();
        assert_eq!(reply, "<ok/>");

        let seen: Vec<(HttpMethod, String, bool)> = session
            .transport()
            .seen
            .lock()
            .unwrap()
            .iter()
            .map(|r| (r.method, r.url.clone(), r.body.is_some()))
            .collect();
        let root = "https://jss.example.com/JSSResource";
        assert_eq!(
            seen,
            vec![
                (HttpMethod::Get, format!("{root}/scripts"), false),
                (HttpMethod::Post, format!("{root}/scripts/id/0"), true),
                (HttpMethod::Put, format!("{root}/scripts/id/3"), true),
                (HttpMethod::Delete, format!("{root}/scripts/id/3"), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_without_body_for_put_never_reaches_transport() {
        let session = session();
        let result = send(&session, ResourceKind::Site, ResourceOperation::Update { id: 1 }, None).await;

        assert!(matches!(result, Err(HttpError::InvalidRequest(_))));
        assert!(session.transport().seen.lock().unwrap().is_empty());
    }
}
