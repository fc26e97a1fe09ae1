//! Request modifiers.
//!
//! A modifier is a pure transformation applied to a [`RequestDescriptor`]
//! before every transport call. The client applies its modifiers in a
//! fixed, documented order; later modifiers observe the output of earlier
//! ones. Modifiers are configured once at client construction and never
//! mutate shared state — they consume a descriptor and return a new one.
//!
//! The default chain, in order:
//!
//! 1. [`UserAgentModifier`]
//! 2. [`CorrelationIdModifier`]
//! 3. [`TenantModifier`]
//! 4. [`ApiKeyModifier`] (only when an API key is configured)
//! 5. [`ProductTagModifier`]
//! 6. [`BearerTokenModifier`]
//!
//! After the chain runs, the client re-stamps the `Authorization` header
//! with the live token whenever any stage left one present, so a token
//! refreshed mid-flight is always the one that reaches the wire.

use std::sync::Arc;

use uuid::Uuid;

use crate::clients::http_request::RequestDescriptor;
use crate::clients::token::TokenStore;
use crate::config::{ApiKey, AppInfo, ProductId, Tenant};
use crate::error::ConfigError;

/// The `Authorization` header name.
pub const AUTHORIZATION_HEADER: &str = "Authorization";
/// The correlation-id header name.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";
/// The tenant header name.
pub const TENANT_HEADER: &str = "X-Tenant";
/// The orchestration-tier API key header name. Upstream expects this exact
/// casing.
pub const API_KEY_HEADER: &str = "X-api-key";
/// The user-agent header name.
pub const USER_AGENT_HEADER: &str = "User-Agent";
/// The query item key carrying the product tag.
pub const PRODUCT_QUERY_KEY: &str = "product";

/// Replacement for any user-agent component the host application did not
/// supply.
const FALLBACK_COMPONENT: &str = "0.0.0";

/// A pure transformation applied to a request before sending.
pub trait RequestModifier: Send + Sync {
    /// Returns a transformed copy of the request.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the request cannot be stamped; the
    /// client surfaces this locally and never sends the request.
    fn modify(&self, request: RequestDescriptor) -> Result<RequestDescriptor, ConfigError>;
}

/// Convenience alias for a shared modifier.
pub type SharedModifier = Arc<dyn RequestModifier>;

/// Stamps `Authorization: Bearer <token>` with the live token value.
///
/// The token is read from the shared [`TokenStore`] at the moment the
/// request is sent, not captured when the modifier is constructed. Nothing
/// is stamped while the store is empty.
#[derive(Clone, Debug)]
pub struct BearerTokenModifier {
    token: TokenStore,
}

impl BearerTokenModifier {
    /// Creates a modifier reading from the given token store.
    #[must_use]
    pub const fn new(token: TokenStore) -> Self {
        Self { token }
    }
}

impl RequestModifier for BearerTokenModifier {
    fn modify(&self, request: RequestDescriptor) -> Result<RequestDescriptor, ConfigError> {
        let token = self.token.get();
        if token.is_empty() {
            return Ok(request);
        }
        Ok(request.header(AUTHORIZATION_HEADER, format!("Bearer {token}")))
    }
}

/// Stamps a fresh correlation id on every invocation.
///
/// Each outgoing attempt gets a new UUID, including the retry issued after
/// a credential refresh, so every wire attempt is independently traceable.
#[derive(Clone, Copy, Debug, Default)]
pub struct CorrelationIdModifier;

impl CorrelationIdModifier {
    /// Creates the modifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RequestModifier for CorrelationIdModifier {
    fn modify(&self, request: RequestDescriptor) -> Result<RequestDescriptor, ConfigError> {
        Ok(request.header(CORRELATION_ID_HEADER, Uuid::new_v4().to_string()))
    }
}

/// Stamps the pipe-delimited `User-Agent` the upstream gateway parses.
///
/// The shape is fixed:
/// `<app>|<app-version>|<device-model>|<os-version>|iOSSDK|<sdk-version>|darwin`.
/// The `iOSSDK` marker and the trailing `darwin` token are literals the
/// gateway's parsers key on; missing components are replaced with `0.0.0`.
#[derive(Clone, Debug)]
pub struct UserAgentModifier {
    user_agent: String,
}

impl UserAgentModifier {
    /// Creates a modifier from the host-application details.
    #[must_use]
    pub fn new(info: &AppInfo) -> Self {
        let component = |value: &Option<String>| {
            value
                .clone()
                .unwrap_or_else(|| FALLBACK_COMPONENT.to_string())
        };
        let user_agent = format!(
            "{}|{}|{}|{}|iOSSDK|{}|darwin",
            component(&info.app_name),
            component(&info.app_version),
            component(&info.device_model),
            component(&info.os_version),
            component(&info.sdk_version),
        );
        Self { user_agent }
    }

    /// Returns the assembled user-agent value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl RequestModifier for UserAgentModifier {
    fn modify(&self, request: RequestDescriptor) -> Result<RequestDescriptor, ConfigError> {
        Ok(request.header(USER_AGENT_HEADER, self.user_agent.clone()))
    }
}

/// Stamps the tenant header on every request.
///
/// An empty tenant can never reach this point: [`Tenant`] rejects empty
/// values at configuration time, before any request exists.
#[derive(Clone, Debug)]
pub struct TenantModifier {
    tenant: Tenant,
}

impl TenantModifier {
    /// Creates a modifier stamping the given tenant.
    #[must_use]
    pub const fn new(tenant: Tenant) -> Self {
        Self { tenant }
    }
}

impl RequestModifier for TenantModifier {
    fn modify(&self, request: RequestDescriptor) -> Result<RequestDescriptor, ConfigError> {
        if self.tenant.as_ref().is_empty() {
            return Err(ConfigError::EmptyTenant);
        }
        Ok(request.header(TENANT_HEADER, self.tenant.as_ref()))
    }
}

/// Stamps the orchestration-tier API key header.
#[derive(Clone, Debug)]
pub struct ApiKeyModifier {
    api_key: ApiKey,
}

impl ApiKeyModifier {
    /// Creates a modifier stamping the given key.
    #[must_use]
    pub const fn new(api_key: ApiKey) -> Self {
        Self { api_key }
    }
}

impl RequestModifier for ApiKeyModifier {
    fn modify(&self, request: RequestDescriptor) -> Result<RequestDescriptor, ConfigError> {
        Ok(request.header(API_KEY_HEADER, self.api_key.as_ref()))
    }
}

/// Appends the fixed `product` query item.
///
/// Existing query items are preserved untouched. The chain is applied to
/// the caller's original descriptor on every attempt, so the tag appears
/// exactly once per dispatched request.
#[derive(Clone, Debug)]
pub struct ProductTagModifier {
    product_id: ProductId,
}

impl ProductTagModifier {
    /// Creates a modifier appending the given product tag.
    #[must_use]
    pub const fn new(product_id: ProductId) -> Self {
        Self { product_id }
    }
}

impl RequestModifier for ProductTagModifier {
    fn modify(&self, request: RequestDescriptor) -> Result<RequestDescriptor, ConfigError> {
        Ok(request.query_item(PRODUCT_QUERY_KEY, self.product_id.as_ref()))
    }
}
