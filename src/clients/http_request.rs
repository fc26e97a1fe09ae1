//! Request descriptor types for the CareSync API SDK.
//!
//! A [`RequestDescriptor`] is an immutable specification of an outgoing
//! request: method, path, query items, headers, and an optional encoded
//! body. Construction methods consume the descriptor and return a new
//! value, so no shared state is ever observed or mutated — request
//! modifiers rely on this to compose safely.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::clients::errors::TransportError;

/// HTTP methods supported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Content type for request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyType {
    /// JSON content type (`application/json`).
    Json,
    /// Form content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
}

impl BodyType {
    /// Returns the MIME type string for this body type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

/// An immutable specification of an outgoing request.
///
/// Query items are an ordered list, not a map: merging preserves existing
/// items and appends new ones without replacing, and duplicates are legal
/// on the wire.
///
/// # Example
///
/// ```rust
/// use caresync_api::{HttpMethod, RequestDescriptor};
/// use serde_json::json;
///
/// let descriptor = RequestDescriptor::new(HttpMethod::Post, "/v1/visits")
///     .query_item("region", "seattle")
///     .header("X-Feature-Flag", "on")
///     .json_body(&json!({"reason": "checkup"}))
///     .unwrap();
///
/// assert_eq!(descriptor.path, "/v1/visits");
/// ```
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The path relative to the client's base URL.
    pub path: String,
    /// Ordered query items appended to the URL.
    pub query_items: Vec<(String, String)>,
    /// Headers to include in the request.
    pub headers: HashMap<String, String>,
    /// The encoded request body, if any.
    pub body: Option<Vec<u8>>,
    /// The content type of the body.
    pub body_type: Option<BodyType>,
}

impl RequestDescriptor {
    /// Creates a new descriptor for the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query_items: Vec::new(),
            headers: HashMap::new(),
            body: None,
            body_type: None,
        }
    }

    /// Returns a descriptor with the method replaced.
    #[must_use]
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Returns a descriptor with the path replaced.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Returns a descriptor with the given query items appended.
    ///
    /// Pre-existing items are preserved; nothing is replaced.
    #[must_use]
    pub fn query_items<K, V>(mut self, items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query_items
            .extend(items.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Returns a descriptor with a single query item appended.
    #[must_use]
    pub fn query_item(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_items([(key.into(), value.into())])
    }

    /// Returns a descriptor with the given header set.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Returns a descriptor carrying `payload` encoded as a JSON body.
    ///
    /// Date fields serialize deterministically when annotated with the
    /// [`datetime::iso8601`](crate::datetime::iso8601) helpers.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Encode`] if the payload cannot be
    /// serialized. The request is never sent in that case.
    pub fn json_body<T: Serialize>(mut self, payload: &T) -> Result<Self, TransportError> {
        let bytes = serde_json::to_vec(payload).map_err(TransportError::Encode)?;
        self.body = Some(bytes);
        self.body_type = Some(BodyType::Json);
        Ok(self)
    }

    /// Returns a descriptor carrying the given pairs as a form-encoded body.
    #[must_use]
    pub fn form_body<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let encoded = pairs
            .into_iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    urlencoding::encode(k.as_ref()),
                    urlencoding::encode(v.as_ref())
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        self.body = Some(encoded.into_bytes());
        self.body_type = Some(BodyType::FormUrlEncoded);
        self
    }
}
