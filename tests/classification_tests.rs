//! End-to-end error classification tests.
//!
//! These tests run real failures through the pipeline and verify that
//! feature code receives the specific family variant the upstream contract
//! promises, with the generic fallback catching everything else.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use caresync_api::scheduling::SchedulingError;
use caresync_api::visits::VisitError;
use caresync_api::{
    ApiClient, ApiConfig, ApiError, BaseUrl, HttpMethod, ProductId, RequestDescriptor, Tenant,
};

fn config_for(server_uri: &str) -> ApiConfig {
    ApiConfig::builder()
        .base_url(BaseUrl::new(server_uri).unwrap())
        .tenant(Tenant::new("acme-health").unwrap())
        .product_id(ProductId::new("health-portal").unwrap())
        .build()
        .unwrap()
}

async fn failing_call(server: &MockServer, request_path: &str) -> caresync_api::TransportError {
    let client = ApiClient::new(config_for(&server.uri()));
    let descriptor = RequestDescriptor::new(HttpMethod::Get, request_path);
    client.request_data(&descriptor, None).await.unwrap_err()
}

#[tokio::test]
async fn test_region_busy_classifies_for_the_visit_family() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/visits/availability"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"code":"REGION_BUSY","message":"all providers busy"}"#),
        )
        .mount(&server)
        .await;

    let error = failing_call(&server, "/v1/visits/availability").await;
    // 400 would also match the generic bad-request rule; the family rule
    // takes precedence.
    assert!(matches!(
        VisitError::classify(error),
        VisitError::RegionBusy
    ));
}

#[tokio::test]
async fn test_slot_unavailable_classifies_for_the_scheduling_family() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/scheduling/book"))
        .respond_with(
            ResponseTemplate::new(409).set_body_string(r#"{"error":"SlotUnavailable"}"#),
        )
        .mount(&server)
        .await;

    let error = failing_call(&server, "/v1/scheduling/book").await;
    assert!(matches!(
        SchedulingError::classify(error),
        SchedulingError::SlotUnavailable
    ));
}

#[tokio::test]
async fn test_unmatched_500_is_internal_server_error_where_defined() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/anything"))
        .respond_with(ResponseTemplate::new(500).set_body_string("unexpected"))
        .mount(&server)
        .await;

    let visit_error = failing_call(&server, "/v1/anything").await;
    assert!(matches!(
        VisitError::classify(visit_error),
        VisitError::InternalServerError
    ));

    let scheduling_error = failing_call(&server, "/v1/anything").await;
    assert!(matches!(
        SchedulingError::classify(scheduling_error),
        SchedulingError::InternalServerError
    ));

    // The generic family defines no 500 case, so it stays unknown.
    let generic_error = failing_call(&server, "/v1/anything").await;
    assert!(matches!(
        ApiError::classify(generic_error),
        ApiError::Unknown(_)
    ));
}

#[tokio::test]
async fn test_unrecognized_failure_wraps_the_generic_family() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/scheduling/book"))
        .respond_with(ResponseTemplate::new(400).set_body_string("malformed payload"))
        .mount(&server)
        .await;

    let error = failing_call(&server, "/v1/scheduling/book").await;
    assert!(matches!(
        SchedulingError::classify(error),
        SchedulingError::Api(ApiError::BadRequest)
    ));
}

#[tokio::test]
async fn test_body_matching_preserves_exact_upstream_wording() {
    let server = MockServer::start().await;
    // Lower-cased wording must not match: the contract is case-sensitive.
    Mock::given(method("GET"))
        .and(path("/v1/scheduling/book"))
        .respond_with(ResponseTemplate::new(409).set_body_string(r#"{"error":"slotunavailable"}"#))
        .mount(&server)
        .await;

    let error = failing_call(&server, "/v1/scheduling/book").await;
    assert!(matches!(
        SchedulingError::classify(error),
        SchedulingError::Api(ApiError::Unknown(_))
    ));
}
