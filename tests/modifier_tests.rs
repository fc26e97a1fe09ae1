//! Integration tests for the request-modifier chain.
//!
//! These tests verify what actually reaches the wire: header stamps, the
//! user-agent shape, the product query tag, and the authorization
//! overwrite rule.

use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use caresync_api::{
    ApiClient, ApiConfig, ApiKey, AppInfo, BaseUrl, HttpMethod, ProductId, RequestDescriptor,
    Tenant,
};

fn config_builder(server_uri: &str) -> caresync_api::ApiConfigBuilder {
    ApiConfig::builder()
        .base_url(BaseUrl::new(server_uri).unwrap())
        .tenant(Tenant::new("acme-health").unwrap())
        .product_id(ProductId::new("health-portal").unwrap())
}

/// Looks up a header on a recorded request by name, case-insensitively.
fn recorded_header(request: &wiremock::Request, name: &str) -> Option<String> {
    request.headers.iter().find_map(|(key, values)| {
        if key.to_string().eq_ignore_ascii_case(name) {
            Some(values.to_string())
        } else {
            None
        }
    })
}

fn full_app_info() -> AppInfo {
    AppInfo {
        app_name: Some("App".to_string()),
        app_version: Some("1.2.3".to_string()),
        device_model: Some("iPhone".to_string()),
        os_version: Some("17.0".to_string()),
        sdk_version: Some("9.9.9".to_string()),
    }
}

#[tokio::test]
async fn test_every_request_carries_the_standard_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clinics"))
        .and(header("X-Tenant", "acme-health"))
        .and(header(
            "User-Agent",
            "App|1.2.3|iPhone|17.0|iOSSDK|9.9.9|darwin",
        ))
        .and(header_exists("X-Correlation-ID"))
        .and(header("Authorization", "Bearer wire-token"))
        .and(query_param("product", "health-portal"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_builder(&server.uri())
        .app_info(full_app_info())
        .build()
        .unwrap();
    let client = ApiClient::new(config);
    client.set_token("wire-token");

    let descriptor = RequestDescriptor::new(HttpMethod::Get, "/v1/clinics");
    client.request_data(&descriptor, None).await.unwrap();
}

#[tokio::test]
async fn test_api_key_header_sent_for_orchestration_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/orchestration/status"))
        .and(header("X-api-key", "orchestration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_builder(&server.uri())
        .api_key(ApiKey::new("orchestration-key").unwrap())
        .build()
        .unwrap();
    let client = ApiClient::new(config);

    let descriptor = RequestDescriptor::new(HttpMethod::Get, "/v1/orchestration/status");
    client.request_data(&descriptor, None).await.unwrap();
}

#[tokio::test]
async fn test_user_agent_falls_back_for_missing_components() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clinics"))
        .and(header(
            "User-Agent",
            "0.0.0|0.0.0|0.0.0|0.0.0|iOSSDK|0.0.0|darwin",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(config_builder(&server.uri()).build().unwrap());
    let descriptor = RequestDescriptor::new(HttpMethod::Get, "/v1/clinics");
    client.request_data(&descriptor, None).await.unwrap();
}

#[tokio::test]
async fn test_product_tag_appears_exactly_once_and_preserves_existing_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/slots"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = ApiClient::new(config_builder(&server.uri()).build().unwrap());
    let descriptor = RequestDescriptor::new(HttpMethod::Get, "/v1/slots")
        .query_item("region", "seattle")
        .query_item("limit", "10");
    client.request_data(&descriptor, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let pairs: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let product_count = pairs.iter().filter(|(k, _)| k == "product").count();

    assert_eq!(product_count, 1);
    assert!(pairs.contains(&("region".to_string(), "seattle".to_string())));
    assert!(pairs.contains(&("limit".to_string(), "10".to_string())));
}

#[tokio::test]
async fn test_no_authorization_header_while_token_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clinics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = ApiClient::new(config_builder(&server.uri()).build().unwrap());
    let descriptor = RequestDescriptor::new(HttpMethod::Get, "/v1/clinics");
    client.request_data(&descriptor, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(recorded_header(&requests[0], "authorization").is_none());
}

#[tokio::test]
async fn test_caller_supplied_authorization_is_overwritten_with_live_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clinics"))
        .and(header("Authorization", "Bearer live-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(config_builder(&server.uri()).build().unwrap());
    client.set_token("live-token");

    let descriptor = RequestDescriptor::new(HttpMethod::Get, "/v1/clinics")
        .header("Authorization", "Bearer something-stale");
    client.request_data(&descriptor, None).await.unwrap();
}

#[tokio::test]
async fn test_correlation_id_is_fresh_per_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/clinics"))
        .and(header_exists("X-Correlation-ID"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = ApiClient::new(config_builder(&server.uri()).build().unwrap());
    let descriptor = RequestDescriptor::new(HttpMethod::Get, "/v1/clinics");
    client.request_data(&descriptor, None).await.unwrap();
    client.request_data(&descriptor, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let first = recorded_header(&requests[0], "x-correlation-id").unwrap();
    let second = recorded_header(&requests[1], "x-correlation-id").unwrap();
    assert_ne!(first, second);
}
