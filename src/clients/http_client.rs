//! The asynchronous API client.
//!
//! [`ApiClient`] executes one logical request end-to-end: it applies the
//! request-modifier chain, dispatches the transport call, runs the response
//! validators, and presents the result as raw bytes, a decoded object, a
//! decoded string, or a bare success. When a request fails with an
//! unauthorized response and a refresh delegate is registered, the client
//! runs the credential-refresh protocol and retries the whole sequence
//! exactly once.
//!
//! # Concurrency
//!
//! Each logical request is an independent task; the client imposes no
//! queueing or ordering between requests. The only shared mutable state is
//! the bearer-token cell, which supports concurrent readers and atomic
//! whole-value writes. Dropping a request future cancels the in-flight
//! transport call.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::de::DeserializeOwned;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{HttpMethod, RequestDescriptor};
use crate::clients::http_response::{decode_text, RawResponse, TextEncoding};
use crate::clients::modifiers::{
    ApiKeyModifier, BearerTokenModifier, CorrelationIdModifier, ProductTagModifier, SharedModifier,
    TenantModifier, UserAgentModifier, AUTHORIZATION_HEADER,
};
use crate::clients::recovery::{RecoveryHandler, TokenRefreshDelegate};
use crate::clients::token::TokenStore;
use crate::clients::validators::{status_validator, ResponseValidator};
use crate::config::ApiConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The asynchronous client every remote call funnels through.
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync`; share it behind an `Arc` across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use caresync_api::{ApiClient, ApiConfig, HttpMethod, RequestDescriptor};
///
/// let client = ApiClient::new(config);
/// client.set_token("bearer-token");
///
/// let descriptor = RequestDescriptor::new(HttpMethod::Get, "/v1/clinics");
/// let clinics: Vec<Clinic> = client.request_object(&descriptor, None).await?;
/// ```
pub struct ApiClient {
    /// The internal reqwest HTTP client.
    http: reqwest::Client,
    config: ApiConfig,
    token: TokenStore,
    modifiers: Vec<SharedModifier>,
    validators: Vec<ResponseValidator>,
    recovery: RwLock<Option<Arc<RecoveryHandler>>>,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a client with the default modifier chain and validator.
    ///
    /// The default chain, in order: user-agent, correlation-id, tenant,
    /// API key (when configured), product tag, bearer token. The default
    /// validator accepts statuses in `[200, 300)`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        let token = TokenStore::new();
        let modifiers = Self::default_modifiers(&config, &token);

        Self {
            http,
            config,
            token,
            modifiers,
            validators: vec![status_validator()],
            recovery: RwLock::new(None),
        }
    }

    /// Replaces the modifier chain.
    ///
    /// Modifiers run in the given order on every outgoing attempt.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Vec<SharedModifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replaces the default validators.
    #[must_use]
    pub fn with_validators(mut self, validators: Vec<ResponseValidator>) -> Self {
        self.validators = validators;
        self
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the configured modifier chain.
    #[must_use]
    pub fn modifiers(&self) -> &[SharedModifier] {
        &self.modifiers
    }

    /// Returns the current bearer token.
    #[must_use]
    pub fn token(&self) -> String {
        self.token.get()
    }

    /// Replaces the current bearer token.
    ///
    /// Requests already in flight keep the token they were stamped with;
    /// every subsequent attempt reads the new value.
    pub fn set_token(&self, token: impl Into<String>) {
        self.token.set(token);
    }

    /// Registers the credential-refresh delegate.
    ///
    /// The delegate is held weakly: the caller keeps ownership, and once
    /// the caller drops it, unauthorized failures pass through unrecovered.
    pub fn set_refresh_delegate<D>(&self, delegate: &Arc<D>)
    where
        D: TokenRefreshDelegate + 'static,
    {
        let shared: Arc<dyn TokenRefreshDelegate> = delegate.clone();
        let handler = RecoveryHandler::new(Arc::downgrade(&shared), self.token.clone());
        *self
            .recovery
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(handler));
    }

    /// Removes any registered credential-refresh delegate.
    pub fn clear_refresh_delegate(&self) {
        *self
            .recovery
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Executes the request and returns the raw response body.
    ///
    /// Dropping the returned future cancels the in-flight transport call.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`]: `Network` for connectivity failures,
    /// `Response` when a validator rejects the response (the default
    /// validator rejects everything outside `[200, 300)`, capturing the
    /// exact status and raw body), and `NoData` when the response body is
    /// empty.
    pub async fn request_data(
        &self,
        descriptor: &RequestDescriptor,
        validators: Option<&[ResponseValidator]>,
    ) -> Result<Vec<u8>, TransportError> {
        let response = self.execute(descriptor, validators).await?;
        if response.body.is_empty() {
            return Err(TransportError::NoData);
        }
        Ok(response.body)
    }

    /// Executes the request and decodes the body as JSON into `T`.
    ///
    /// Date fields decode with the fixed ISO-8601 pattern when annotated
    /// with the [`datetime::iso8601`](crate::datetime::iso8601) helpers;
    /// fractional seconds are not round-tripped.
    ///
    /// # Errors
    ///
    /// As [`request_data`](Self::request_data), plus
    /// [`TransportError::Decode`] carrying the underlying cause when the
    /// body is not valid JSON for `T`.
    pub async fn request_object<T>(
        &self,
        descriptor: &RequestDescriptor,
        validators: Option<&[ResponseValidator]>,
    ) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        let data = self.request_data(descriptor, validators).await?;
        serde_json::from_slice(&data).map_err(TransportError::Decode)
    }

    /// Executes the request and decodes the body as text.
    ///
    /// # Errors
    ///
    /// As [`request_data`](Self::request_data), plus
    /// [`TransportError::StringDecode`] when the body is not valid in the
    /// requested encoding.
    pub async fn request_string(
        &self,
        descriptor: &RequestDescriptor,
        encoding: TextEncoding,
        validators: Option<&[ResponseValidator]>,
    ) -> Result<String, TransportError> {
        let data = self.request_data(descriptor, validators).await?;
        decode_text(&data, encoding)
    }

    /// Executes the request and discards the body on success.
    ///
    /// Unlike the byte-returning surfaces, an empty body is success here,
    /// so bodiless 204-style responses pass.
    ///
    /// # Errors
    ///
    /// As [`request_data`](Self::request_data), minus the empty-body case.
    pub async fn request_void(
        &self,
        descriptor: &RequestDescriptor,
        validators: Option<&[ResponseValidator]>,
    ) -> Result<(), TransportError> {
        self.execute(descriptor, validators).await.map(|_| ())
    }

    /// Runs one logical request, with at most one recovery retry.
    async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        validators: Option<&[ResponseValidator]>,
    ) -> Result<RawResponse, TransportError> {
        match self.perform(descriptor, validators).await {
            Ok(response) => Ok(response),
            Err(error) => {
                let handler = self
                    .recovery
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone();
                if let Some(handler) = handler {
                    if handler.can_handle(&error) && handler.attempt_recovery().await {
                        // The retry re-applies the whole chain, picking up
                        // the refreshed token and a fresh correlation id.
                        return self.perform(descriptor, validators).await;
                    }
                }
                Err(error)
            }
        }
    }

    /// Runs a single attempt: modifiers, dispatch, validation.
    async fn perform(
        &self,
        descriptor: &RequestDescriptor,
        validators: Option<&[ResponseValidator]>,
    ) -> Result<RawResponse, TransportError> {
        let request = self.apply_modifiers(descriptor)?;
        let url = self.build_url(&request)?;

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let (Some(body), Some(body_type)) = (&request.body, request.body_type) {
            builder = builder
                .header("Content-Type", body_type.as_content_type())
                .body(body.clone());
        }

        tracing::debug!(method = %request.method, path = %request.path, "dispatching request");

        let response = builder.send().await.map_err(TransportError::Network)?;

        let status = response.status().as_u16();
        let headers = Self::parse_response_headers(response.headers())?;
        let body = response
            .bytes()
            .await
            .map_err(TransportError::Network)?
            .to_vec();

        let raw = RawResponse::new(status, headers, body);
        if !raw.is_ok() {
            tracing::debug!(status = %raw.status, path = %request.path, "non-success response");
        }

        let checks = validators.unwrap_or(self.validators.as_slice());
        for validator in checks {
            validator(raw.status, &raw.body)?;
        }

        Ok(raw)
    }

    /// Applies the modifier chain, then the `Authorization` overwrite rule:
    /// if any stage left an `Authorization` header present, it is replaced
    /// with the live bearer token so stale stamps never reach the wire.
    fn apply_modifiers(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<RequestDescriptor, TransportError> {
        let mut request = descriptor.clone();
        for modifier in &self.modifiers {
            request = modifier.modify(request)?;
        }

        if request.headers.contains_key(AUTHORIZATION_HEADER) {
            let token = self.token.get();
            if !token.is_empty() {
                request
                    .headers
                    .insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {token}"));
            }
        }

        Ok(request)
    }

    /// Combines the configured base URL with the request path and query.
    fn build_url(&self, request: &RequestDescriptor) -> Result<reqwest::Url, TransportError> {
        let base = self.config.base_url().as_ref();
        let path = &request.path;
        let joined = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };

        let mut url = reqwest::Url::parse(&joined).map_err(|_| TransportError::InvalidUrl {
            url: joined.clone(),
        })?;
        if !request.query_items.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query_items {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Builds the default modifier chain for the given configuration.
    fn default_modifiers(config: &ApiConfig, token: &TokenStore) -> Vec<SharedModifier> {
        let mut modifiers: Vec<SharedModifier> = vec![
            Arc::new(UserAgentModifier::new(config.app_info())),
            Arc::new(CorrelationIdModifier::new()),
            Arc::new(TenantModifier::new(config.tenant().clone())),
        ];
        if let Some(api_key) = config.api_key() {
            modifiers.push(Arc::new(ApiKeyModifier::new(api_key.clone())));
        }
        modifiers.push(Arc::new(ProductTagModifier::new(
            config.product_id().clone(),
        )));
        modifiers.push(Arc::new(BearerTokenModifier::new(token.clone())));
        modifiers
    }

    /// Parses response headers into a lower-case-keyed map.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> Result<HashMap<String, Vec<String>>, TransportError> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let value = value
                .to_str()
                .map_err(|_| TransportError::InvalidResponse)?
                .to_string();
            result
                .entry(name.as_str().to_lowercase())
                .or_default()
                .push(value);
        }
        Ok(result)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("token", &self.token)
            .field("modifier_count", &self.modifiers.len())
            .finish_non_exhaustive()
    }
}
