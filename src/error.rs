//! Configuration and shared domain error types for the CareSync API SDK.
//!
//! This module contains two closely related error layers:
//!
//! - [`ConfigError`]: fail-fast validation errors raised while building SDK
//!   configuration. These indicate programmer error and are reported before
//!   any request is sent.
//! - [`ApiError`]: the generic domain-error family shared by every endpoint
//!   family. Specialized families ([`VisitError`](crate::visits::VisitError),
//!   [`SchedulingError`](crate::scheduling::SchedulingError)) wrap an
//!   `ApiError` for anything their own rule tables do not recognize.
//!
//! # Example
//!
//! ```rust
//! use caresync_api::{ConfigError, Tenant};
//!
//! let result = Tenant::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyTenant)));
//! ```

use thiserror::Error;

use crate::clients::TransportError;

/// Errors that can occur during SDK configuration.
///
/// Each variant carries a clear, actionable message. Configuration errors
/// are always raised at construction time, never mid-request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Tenant cannot be empty.
    #[error("Tenant cannot be empty. Every request must carry the tenant it is issued for.")]
    EmptyTenant,

    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid CareSync API key.")]
    EmptyApiKey,

    /// Product identifier cannot be empty.
    #[error("Product identifier cannot be empty. Please provide the product tag issued for your integration.")]
    EmptyProductId,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute URL with scheme (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// The generic domain-error family.
///
/// Every endpoint family classifies transport failures into its own closed
/// variant set first; anything left over is mapped through
/// [`ApiError::classify`] and carried in that family's `Api` case.
///
/// The status-code mapping is fixed by the upstream contract:
///
/// | Status | Variant |
/// |--------|---------|
/// | 400    | [`BadRequest`](Self::BadRequest) |
/// | 401    | [`Unauthorized`](Self::Unauthorized) |
/// | 404    | [`NotFound`](Self::NotFound) |
/// | 432    | [`BadRequest`](Self::BadRequest) |
/// | other  | [`Unknown`](Self::Unknown) |
///
/// [`MissingInformation`](Self::MissingInformation),
/// [`InvalidInput`](Self::InvalidInput), and
/// [`BadRequestWithDetail`](Self::BadRequestWithDetail) are constructed by
/// feature code — local argument validation, or a server-supplied detail
/// string worth surfacing — and never come out of the status table.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required piece of information was missing from the call.
    #[error("required information was missing from the request")]
    MissingInformation,

    /// The server rejected the request (HTTP 400 or 432).
    #[error("the server rejected the request")]
    BadRequest,

    /// The server rejected the request and supplied actionable detail.
    #[error("the server rejected the request: {0}")]
    BadRequestWithDetail(String),

    /// The request was not authorized (HTTP 401).
    #[error("the request was not authorized")]
    Unauthorized,

    /// The requested entity does not exist (HTTP 404).
    #[error("the requested entity was not found")]
    NotFound,

    /// Caller-side input failed validation before any request was sent.
    #[error("input failed validation")]
    InvalidInput,

    /// Any failure the upstream contract does not map to a specific case.
    #[error("request failed")]
    Unknown(#[source] TransportError),
}

impl ApiError {
    /// Classifies a transport error into the generic family.
    ///
    /// Takes ownership of the error; the unmapped case carries the
    /// underlying transport failure for diagnostics.
    #[must_use]
    pub fn classify(error: TransportError) -> Self {
        match error {
            TransportError::Response {
                status: 400 | 432, ..
            } => Self::BadRequest,
            TransportError::Response { status: 401, .. } => Self::Unauthorized,
            TransportError::Response { status: 404, .. } => Self::NotFound,
            other => Self::Unknown(other),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        Self::classify(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> TransportError {
        TransportError::Response {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_empty_tenant_error_message() {
        let error = ConfigError::EmptyTenant;
        assert!(error.to_string().contains("Tenant cannot be empty"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let message = error.to_string();
        assert!(message.contains("base_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_classify_maps_400_to_bad_request() {
        assert!(matches!(
            ApiError::classify(response(400, "nope")),
            ApiError::BadRequest
        ));
    }

    #[test]
    fn test_classify_maps_432_to_bad_request() {
        assert!(matches!(
            ApiError::classify(response(432, "")),
            ApiError::BadRequest
        ));
    }

    #[test]
    fn test_classify_maps_401_to_unauthorized() {
        assert!(matches!(
            ApiError::classify(response(401, "")),
            ApiError::Unauthorized
        ));
    }

    #[test]
    fn test_classify_maps_404_to_not_found() {
        assert!(matches!(
            ApiError::classify(response(404, "")),
            ApiError::NotFound
        ));
    }

    #[test]
    fn test_classify_maps_other_statuses_to_unknown() {
        let classified = ApiError::classify(response(500, "boom"));
        match classified {
            ApiError::Unknown(TransportError::Response { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, b"boom");
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_maps_local_errors_to_unknown() {
        assert!(matches!(
            ApiError::classify(TransportError::NoData),
            ApiError::Unknown(TransportError::NoData)
        ));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let _: &dyn std::error::Error = &ConfigError::EmptyTenant;
        let _: &dyn std::error::Error = &ApiError::NotFound;
    }
}
