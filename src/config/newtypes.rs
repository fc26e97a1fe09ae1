//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear
//! error messages before any request can be built from them.

use std::fmt;

use crate::error::ConfigError;

/// A validated tenant identifier.
///
/// Every outgoing request is stamped with the tenant it is issued for. An
/// empty tenant is a programmer error, so it is rejected here rather than
/// discovered when a malformed request reaches the wire.
///
/// # Example
///
/// ```rust
/// use caresync_api::Tenant;
///
/// let tenant = Tenant::new("acme-health").unwrap();
/// assert_eq!(tenant.as_ref(), "acme-health");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tenant(String);

impl Tenant {
    /// Creates a new validated tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyTenant`] if the tenant is empty.
    pub fn new(tenant: impl Into<String>) -> Result<Self, ConfigError> {
        let tenant = tenant.into();
        if tenant.is_empty() {
            return Err(ConfigError::EmptyTenant);
        }
        Ok(Self(tenant))
    }
}

impl AsRef<str> for Tenant {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated CareSync API key.
///
/// Used for orchestration-tier calls via the `X-api-key` header. The `Debug`
/// implementation masks the value to keep it out of logs.
///
/// # Example
///
/// ```rust
/// use caresync_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated product identifier.
///
/// Appended as the `product` query item to every outgoing request so the
/// upstream gateway can attribute traffic to the issuing integration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new validated product identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyProductId`] if the identifier is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyProductId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated absolute base URL for the API environment.
///
/// Trailing slashes are trimmed so path joining stays predictable.
///
/// # Example
///
/// ```rust
/// use caresync_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the value does not parse
    /// as an absolute `http` or `https` URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let parsed = reqwest::Url::parse(&url)
            .map_err(|_| ConfigError::InvalidBaseUrl { url: url.clone() })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl { url });
        }
        Ok(Self(url.trim_end_matches('/').to_string()))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_rejects_empty() {
        assert!(matches!(Tenant::new(""), Err(ConfigError::EmptyTenant)));
    }

    #[test]
    fn test_tenant_accepts_non_empty() {
        let tenant = Tenant::new("acme-health").unwrap();
        assert_eq!(tenant.as_ref(), "acme-health");
    }

    #[test]
    fn test_api_key_rejects_empty() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_debug_is_masked() {
        let key = ApiKey::new("super-secret").unwrap();
        assert_eq!(format!("{key:?}"), "ApiKey(*****)");
    }

    #[test]
    fn test_product_id_rejects_empty() {
        assert!(matches!(
            ProductId::new(""),
            Err(ConfigError::EmptyProductId)
        ));
    }

    #[test]
    fn test_base_url_rejects_relative() {
        assert!(matches!(
            BaseUrl::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_base_url_rejects_non_http_scheme() {
        assert!(matches!(
            BaseUrl::new("ftp://api.example.com"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let url = BaseUrl::new("https://api.example.com/").unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com");
    }
}
