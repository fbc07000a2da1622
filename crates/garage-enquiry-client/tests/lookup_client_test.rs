//! Contract tests for `EnquiryClient::lookup` against a mock registry.
//!
//! | Registry behaviour | Test |
//! |--------------------|------|
//! | 200 with history | `lookup_maps_registry_response` |
//! | 200 without history | `lookup_without_history_has_empty_expiry` |
//! | 404 | `lookup_returns_none_for_unknown_registration` |
//! | 5xx / 403 | `lookup_surfaces_api_errors` |
//! | malformed body | `lookup_surfaces_deserialization_errors` |
//! | slow response | `lookup_times_out` |
//! | closed port | `lookup_surfaces_transport_errors` |

use std::time::Duration;

use garage_enquiry_client::{EnquiryClient, EnquiryConfig, EnquiryError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REGISTRY_PATH: &str = "/vehicle-enquiry/v1/vehicles";

fn test_client(mock_server: &MockServer) -> EnquiryClient {
    let config = EnquiryConfig::new(mock_server.uri().parse().unwrap(), "test-key");
    EnquiryClient::new(config).unwrap()
}

#[tokio::test]
async fn lookup_maps_registry_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REGISTRY_PATH))
        .and(header("x-api-key", "test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"registrationNumber": "AB12CDE"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "registrationNumber": "AB12CDE",
            "make": "FORD",
            "model": "FOCUS",
            "taxStatus": "Taxed",
            "motTests": [{"expiryDate": "2025-01-01"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let status = client.lookup("AB12CDE").await.unwrap().unwrap();
    assert_eq!(status.mot_expiry, "2025-01-01");
    assert_eq!(status.make_model, "FORD FOCUS");
    assert_eq!(status.tax_status, "Taxed");
}

#[tokio::test]
async fn lookup_without_history_has_empty_expiry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REGISTRY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "make": "TESLA",
            "model": "MODEL 3",
            "taxStatus": "Taxed"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let status = client.lookup("NEW123").await.unwrap().unwrap();
    assert_eq!(status.mot_expiry, "");
    assert_eq!(status.make_model, "TESLA MODEL 3");
}

#[tokio::test]
async fn lookup_returns_none_for_unknown_registration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REGISTRY_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{"status": "404", "title": "Vehicle Not Found"}]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.lookup("ZZ99ZZZ").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn lookup_surfaces_api_errors() {
    for status_code in [403u16, 500, 503] {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(REGISTRY_PATH))
            .respond_with(ResponseTemplate::new(status_code).set_body_string("upstream says no"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        match client.lookup("AB12CDE").await {
            Err(EnquiryError::ApiError { status, body, .. }) => {
                assert_eq!(status, status_code);
                assert_eq!(body, "upstream says no");
            }
            other => panic!("expected ApiError for {status_code}, got: {other:?}"),
        }
    }
}

#[tokio::test]
async fn lookup_surfaces_deserialization_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REGISTRY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.lookup("AB12CDE").await.unwrap_err();
    assert!(
        matches!(err, EnquiryError::Deserialization { .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn lookup_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REGISTRY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"make": "FORD"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = EnquiryConfig::new(mock_server.uri().parse().unwrap(), "test-key")
        .with_timeout(Duration::from_millis(200));
    let client = EnquiryClient::new(config).unwrap();

    let err = client.lookup("AB12CDE").await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got: {err:?}");
}

#[tokio::test]
async fn lookup_surfaces_transport_errors() {
    let config = EnquiryConfig::new("http://127.0.0.1:1".parse().unwrap(), "test-key")
        .with_timeout(Duration::from_millis(500));
    let client = EnquiryClient::new(config).unwrap();

    let err = client.lookup("AB12CDE").await.unwrap_err();
    assert!(matches!(err, EnquiryError::Http { .. }), "got: {err:?}");
}

#[test]
fn endpoint_is_joined_onto_base_url() {
    let config = EnquiryConfig::new("https://registry.example".parse().unwrap(), "k");
    let client = EnquiryClient::new(config).unwrap();
    assert_eq!(
        client.endpoint().as_str(),
        "https://registry.example/vehicle-enquiry/v1/vehicles"
    );
}

#[test]
fn api_key_with_control_characters_is_invalid() {
    let config = EnquiryConfig::new("https://registry.example".parse().unwrap(), "bad\nkey");
    let err = EnquiryClient::new(config).unwrap_err();
    assert!(
        matches!(
            err,
            EnquiryError::Config(garage_enquiry_client::config::ConfigError::InvalidApiKey)
        ),
        "got: {err:?}"
    );
}
