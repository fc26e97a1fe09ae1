//! The transport core of the CareSync API SDK.
//!
//! Every remote call funnels through this module: a caller builds an
//! immutable [`RequestDescriptor`], the [`ApiClient`] applies its
//! [`RequestModifier`] chain, dispatches the call, runs the
//! [`ResponseValidator`]s, and surfaces the result as raw bytes, a decoded
//! object, a decoded string, or a bare success. Failures come back as
//! [`TransportError`]s for the endpoint families to classify.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiClient`]: the async client orchestrating the pipeline
//! - [`RequestDescriptor`]: an immutable outgoing-request value
//! - [`RawResponse`]: the transport-level view of a response
//! - [`RequestModifier`] and the built-in modifiers (bearer token,
//!   correlation id, user-agent, tenant, API key, product tag)
//! - [`ResponseValidator`] and [`status_validator`]
//! - [`TokenRefreshDelegate`] / [`RecoveryHandler`]: the one-shot
//!   credential-refresh protocol
//! - [`TransportError`]: everything the client itself can fail with
//!
//! # Recovery Behavior
//!
//! The client never loops. An unauthorized response with a live refresh
//! delegate triggers one refresh round trip and, on success, one retry of
//! the whole sequence. Every other failure propagates unchanged.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod modifiers;
mod recovery;
mod token;
mod validators;

pub use errors::TransportError;
pub use http_client::{ApiClient, SDK_VERSION};
pub use http_request::{BodyType, HttpMethod, RequestDescriptor};
pub use http_response::{RawResponse, TextEncoding};
pub use modifiers::{
    ApiKeyModifier, BearerTokenModifier, CorrelationIdModifier, ProductTagModifier,
    RequestModifier, SharedModifier, TenantModifier, UserAgentModifier, API_KEY_HEADER,
    AUTHORIZATION_HEADER, CORRELATION_ID_HEADER, PRODUCT_QUERY_KEY, TENANT_HEADER,
    USER_AGENT_HEADER,
};
pub use recovery::{RecoveryHandler, TokenRefreshDelegate};
pub use token::TokenStore;
pub use validators::{status_validator, ResponseValidator};
