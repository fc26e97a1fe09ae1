//! Transport-level error types for the CareSync API SDK.
//!
//! [`TransportError`] is the first tier of the error taxonomy: everything
//! the client itself can produce while building, sending, validating, or
//! decoding a request. Endpoint families map these into their own closed
//! domain variants (second tier) at classification time — see
//! [`ApiError`](crate::ApiError), [`VisitError`](crate::visits::VisitError),
//! and [`SchedulingError`](crate::scheduling::SchedulingError).
//!
//! Nothing here is retried by the client except the unauthorized case,
//! which the credential-refresh recovery handler may recover exactly once.

use thiserror::Error;

use crate::clients::http_response::TextEncoding;
use crate::error::ConfigError;

/// Errors produced inside the client while executing a logical request.
///
/// The [`Response`](Self::Response) variant captures the exact status code
/// and the exact raw body bytes so that downstream classification can match
/// on upstream message wording without any normalization.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or connection error from the underlying transport.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered outside the success range.
    #[error("response returned status {status}")]
    Response {
        /// The HTTP status code of the response.
        status: u16,
        /// The raw, unmodified response body bytes.
        body: Vec<u8>,
    },

    /// The response carried no body where one was required.
    #[error("no data in response")]
    NoData,

    /// The transport produced something that is not a well-formed HTTP
    /// response surface.
    #[error("invalid response format")]
    InvalidResponse,

    /// The request body could not be encoded. Raised locally; the request
    /// is never sent.
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),

    /// The response body could not be decoded into the requested type.
    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),

    /// The response body could not be decoded as text.
    #[error("failed to decode response text as {encoding}")]
    StringDecode {
        /// The encoding the caller requested.
        encoding: TextEncoding,
    },

    /// The descriptor's path and query did not combine into a valid URL.
    #[error("invalid request URL '{url}'")]
    InvalidUrl {
        /// The URL string that failed to parse.
        url: String,
    },

    /// A request modifier rejected the request before it was sent.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TransportError {
    /// Returns the HTTP status code for out-of-contract responses.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body as text for out-of-contract responses.
    ///
    /// Classification rule tables match on this text; invalid UTF-8 byte
    /// sequences are replaced rather than dropped so status-only rules
    /// still apply.
    #[must_use]
    pub fn body_text(&self) -> Option<std::borrow::Cow<'_, str>> {
        match self {
            Self::Response { body, .. } => Some(String::from_utf8_lossy(body)),
            _ => None,
        }
    }

    /// Returns `true` if this is an unauthorized response (HTTP 401).
    ///
    /// This is the only error the credential-refresh recovery handler can
    /// recover from.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Response { status: 401, .. })
    }
}
