//! Configuration types for the CareSync API SDK.
//!
//! This module provides the core configuration types used to initialize the
//! client for API communication.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiConfig`]: The main configuration struct holding all SDK settings
//! - [`ApiConfigBuilder`]: A builder for constructing [`ApiConfig`] instances
//! - [`BaseUrl`]: A validated absolute environment URL
//! - [`Tenant`]: A validated tenant identifier
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`ProductId`]: A validated product tag
//! - [`AppInfo`]: Host-application details stamped into the `User-Agent`
//!
//! # Example
//!
//! ```rust
//! use caresync_api::{ApiConfig, BaseUrl, ProductId, Tenant};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .tenant(Tenant::new("acme-health").unwrap())
//!     .product_id(ProductId::new("health-portal").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl, ProductId, Tenant};

use crate::error::ConfigError;

/// Host-application details used to build the `User-Agent` header.
///
/// Any component left unset is replaced with the literal `"0.0.0"` when the
/// header is assembled; the upstream gateway tolerates placeholder segments
/// but not missing ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppInfo {
    /// The host application's name.
    pub app_name: Option<String>,
    /// The host application's version.
    pub app_version: Option<String>,
    /// The device model the application runs on.
    pub device_model: Option<String>,
    /// The operating-system version.
    pub os_version: Option<String>,
    /// The SDK version embedded in the application.
    pub sdk_version: Option<String>,
}

/// Configuration for the CareSync API SDK.
///
/// Holds everything the client needs to address an environment: the base
/// URL, the tenant every request is issued for, the product tag, an optional
/// orchestration-tier API key, and host-application details.
///
/// # Thread Safety
///
/// `ApiConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use caresync_api::{ApiConfig, ApiKey, BaseUrl, ProductId, Tenant};
///
/// let config = ApiConfig::builder()
///     .base_url(BaseUrl::new("https://api.example.com").unwrap())
///     .tenant(Tenant::new("acme-health").unwrap())
///     .product_id(ProductId::new("health-portal").unwrap())
///     .api_key(ApiKey::new("orchestration-key").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.tenant().as_ref(), "acme-health");
/// ```
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: BaseUrl,
    tenant: Tenant,
    product_id: ProductId,
    api_key: Option<ApiKey>,
    app_info: AppInfo,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the tenant.
    #[must_use]
    pub const fn tenant(&self) -> &Tenant {
        &self.tenant
    }

    /// Returns the product identifier.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the API key, if configured.
    #[must_use]
    pub const fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Returns the host-application details.
    #[must_use]
    pub const fn app_info(&self) -> &AppInfo {
        &self.app_info
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// Required fields are `base_url`, `tenant`, and `product_id`. The API key
/// and [`AppInfo`] are optional.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<BaseUrl>,
    tenant: Option<Tenant>,
    product_id: Option<ProductId>,
    api_key: Option<ApiKey>,
    app_info: Option<AppInfo>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the tenant (required).
    #[must_use]
    pub fn tenant(mut self, tenant: Tenant) -> Self {
        self.tenant = Some(tenant);
        self
    }

    /// Sets the product identifier (required).
    #[must_use]
    pub fn product_id(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Sets the orchestration-tier API key.
    #[must_use]
    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Sets the host-application details.
    #[must_use]
    pub fn app_info(mut self, app_info: AppInfo) -> Self {
        self.app_info = Some(app_info);
        self
    }

    /// Builds the [`ApiConfig`], validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url`,
    /// `tenant`, or `product_id` was not set.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;
        let tenant = self
            .tenant
            .ok_or(ConfigError::MissingRequiredField { field: "tenant" })?;
        let product_id = self.product_id.ok_or(ConfigError::MissingRequiredField {
            field: "product_id",
        })?;

        Ok(ApiConfig {
            base_url,
            tenant,
            product_id,
            api_key: self.api_key,
            app_info: self.app_info.unwrap_or_default(),
        })
    }
}
