//! # CareSync API Rust SDK
//!
//! A Rust SDK for the CareSync patient services API, providing the
//! asynchronous request pipeline every remote call funnels through:
//! request construction, an ordered request-modifier chain, transport
//! execution, response validation and decoding, a one-shot
//! credential-refresh recovery protocol, and a layered error-classification
//! taxonomy with endpoint-family-specific variants.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - Validated newtypes for the base URL, tenant, API key, and product tag
//! - Immutable [`RequestDescriptor`] values with builder-style construction
//! - A fixed, ordered [`RequestModifier`] chain stamping auth, correlation,
//!   user-agent, tenant, API key, and product-tag data on every request
//! - An async [`ApiClient`] with raw-bytes, JSON-object, string, and void
//!   result surfaces
//! - A single-retry credential-refresh protocol via [`TokenRefreshDelegate`]
//! - Closed per-family error sets ([`VisitError`](visits::VisitError),
//!   [`SchedulingError`](scheduling::SchedulingError)) layered over the
//!   generic [`ApiError`]
//!
//! ## Quick Start
//!
//! ```rust
//! use caresync_api::{ApiConfig, AppInfo, BaseUrl, ProductId, Tenant};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .tenant(Tenant::new("acme-health").unwrap())
//!     .product_id(ProductId::new("health-portal").unwrap())
//!     .app_info(AppInfo {
//!         app_name: Some("HealthPortal".to_string()),
//!         app_version: Some("3.1.0".to_string()),
//!         ..AppInfo::default()
//!     })
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use caresync_api::{ApiClient, HttpMethod, RequestDescriptor};
//!
//! let client = ApiClient::new(config);
//! client.set_token("bearer-token");
//!
//! let descriptor = RequestDescriptor::new(HttpMethod::Get, "/v1/clinics")
//!     .query_item("region", "seattle");
//!
//! let clinics: Vec<Clinic> = client.request_object(&descriptor, None).await?;
//! ```
//!
//! ## Credential Refresh
//!
//! A host application registers a [`TokenRefreshDelegate`]; when a request
//! comes back unauthorized, the client asks the delegate for a new token
//! and retries the original request exactly once:
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use caresync_api::TokenRefreshDelegate;
//!
//! struct Refresher;
//!
//! #[async_trait]
//! impl TokenRefreshDelegate for Refresher {
//!     async fn refresh_token(&self) -> Option<String> {
//!         fetch_new_token().await.ok()
//!     }
//! }
//!
//! let delegate = std::sync::Arc::new(Refresher);
//! client.set_refresh_delegate(&delegate);
//! ```
//!
//! ## Error Classification
//!
//! Feature code classifies transport failures into its endpoint family,
//! getting a specific variant whenever the upstream response matches a
//! known `(status, body-substring)` pattern:
//!
//! ```rust,ignore
//! use caresync_api::visits::VisitError;
//!
//! match client.request_void(&descriptor, None).await {
//!     Ok(()) => {}
//!     Err(error) => match VisitError::classify(error) {
//!         VisitError::RegionBusy => show_region_busy_banner(),
//!         other => show_generic_failure(&other),
//!     },
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **Descriptors are values**: modifiers never observe shared state
//! - **Fail-fast validation**: configuration newtypes validate on creation
//! - **Thread-safe**: the client is `Send + Sync`; the token cell supports
//!   concurrent readers and atomic writes
//! - **Bounded recovery**: at most one retry per logical request, only for
//!   the unauthorized case
//! - **Closed error families**: classification is a pure match over a
//!   per-family rule table, never an open-ended hierarchy

pub mod clients;
pub mod config;
pub mod datetime;
pub mod error;
pub mod scheduling;
pub mod visits;

// Re-export public types at crate root for convenience
pub use config::{ApiConfig, ApiConfigBuilder, ApiKey, AppInfo, BaseUrl, ProductId, Tenant};
pub use error::{ApiError, ConfigError};

// Re-export transport core types
pub use clients::{
    status_validator, ApiClient, BodyType, HttpMethod, RawResponse, RequestDescriptor,
    RequestModifier, ResponseValidator, SharedModifier, TextEncoding, TokenRefreshDelegate,
    TokenStore, TransportError, SDK_VERSION,
};
