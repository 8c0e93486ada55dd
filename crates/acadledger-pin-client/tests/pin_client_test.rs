//! Contract tests for the pinning client against the provider's REST
//! surface, simulated with wiremock.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/pinning/pinFileToIPFS` | `pin_bytes_*` |
//! | POST   | `/pinning/pinJSONToIPFS` | `pin_json_*` |
//! | DELETE | `/pinning/unpin/{cid}` | `unpin_*` |
//! | GET    | `/data/testAuthentication` | `check_auth_*` |
//! | GET    | `/ipfs/{cid}` (gateway) | `fetch_json_*` |

use acadledger_core::ContentId;
use acadledger_pin_client::{PinClient, PinServiceConfig, PinServiceError, PinTag};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

/// Build a PinClient with both API and gateway pointed at a wiremock server.
fn test_client(mock_server: &MockServer) -> PinClient {
    let mut config = PinServiceConfig::local_mock(0, "test-token").unwrap();
    config.api_url = mock_server.uri().parse().unwrap();
    config.gateway_url = mock_server.uri().parse().unwrap();
    PinClient::new(config).unwrap()
}

fn pin_response() -> serde_json::Value {
    serde_json::json!({
        "IpfsHash": CID,
        "PinSize": 1024,
        "Timestamp": "2026-02-15T12:00:00Z",
        "isDuplicate": false
    })
}

// ── POST /pinning/pinFileToIPFS ──────────────────────────────────────

#[tokio::test]
async fn pin_bytes_sends_bearer_token_and_returns_receipt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pin_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let receipt = client
        .pin_bytes(b"certificate bytes".to_vec(), "diploma.pdf", PinTag::named("diploma"))
        .await
        .unwrap();

    assert_eq!(receipt.content_id.as_str(), CID);
    assert_eq!(receipt.pin_size, 1024);
    assert!(!receipt.is_duplicate);
}

#[tokio::test]
async fn pin_bytes_rejects_oversized_payload_without_sending() {
    let mock_server = MockServer::start().await;

    // No mock mounted: an oversized payload must never reach the wire.
    let mut config = PinServiceConfig::local_mock(0, "test-token").unwrap();
    config.api_url = mock_server.uri().parse().unwrap();
    config.gateway_url = mock_server.uri().parse().unwrap();
    config.max_upload_bytes = 8;
    let client = PinClient::new(config).unwrap();

    let result = client
        .pin_bytes(vec![0u8; 64], "big.pdf", PinTag::named("big"))
        .await;
    match result.unwrap_err() {
        PinServiceError::PayloadTooLarge { size, limit } => {
            assert_eq!(size, 64);
            assert_eq!(limit, 8);
        }
        other => panic!("expected PayloadTooLarge, got: {other:?}"),
    }
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn pin_bytes_maps_401_to_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client
        .pin_bytes(b"x".to_vec(), "a.pdf", PinTag::named("a"))
        .await;
    match result.unwrap_err() {
        PinServiceError::Unavailable { body, .. } => assert!(body.contains("bad token")),
        other => panic!("expected Unavailable, got: {other:?}"),
    }
}

#[tokio::test]
async fn pin_bytes_maps_413_to_payload_too_large() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinFileToIPFS"))
        .respond_with(ResponseTemplate::new(413))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client
        .pin_bytes(b"x".to_vec(), "a.pdf", PinTag::named("a"))
        .await;
    assert!(matches!(
        result.unwrap_err(),
        PinServiceError::PayloadTooLarge { .. }
    ));
}

// ── POST /pinning/pinJSONToIPFS ──────────────────────────────────────

#[tokio::test]
async fn pin_json_wraps_content_in_provider_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pin_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let doc = serde_json::json!({"program": "Computer Science", "level": "Bachelor"});
    let tag = PinTag::named("credential-meta").with("type", "credential-metadata");
    let receipt = client.pin_json(&doc, tag).await.unwrap();
    assert_eq!(receipt.content_id.as_str(), CID);

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["pinataContent"]["program"], "Computer Science");
    assert_eq!(body["pinataMetadata"]["name"], "credential-meta");
    assert_eq!(body["pinataOptions"]["cidVersion"], 1);
}

#[tokio::test]
async fn pin_json_surfaces_server_error_with_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/pinning/pinJSONToIPFS"))
        .respond_with(ResponseTemplate::new(500).set_body_string("pin backlog"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client
        .pin_json(&serde_json::json!({"k": "v"}), PinTag::named("m"))
        .await;
    match result.unwrap_err() {
        PinServiceError::Api { status, body, .. } => {
            assert_eq!(status, 500);
            assert!(body.contains("pin backlog"));
        }
        other => panic!("expected Api, got: {other:?}"),
    }
}

// ── GET /ipfs/{cid} ──────────────────────────────────────────────────

#[tokio::test]
async fn fetch_json_returns_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/ipfs/{CID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"program": "History", "level": "Master"})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let doc: serde_json::Value = client
        .fetch_json(&ContentId::parse(CID).unwrap())
        .await
        .unwrap();
    assert_eq!(doc["program"], "History");
}

#[tokio::test]
async fn fetch_json_maps_404_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/ipfs/{CID}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result: Result<serde_json::Value, _> =
        client.fetch_json(&ContentId::parse(CID).unwrap()).await;
    match result.unwrap_err() {
        PinServiceError::NotFound { content_id, .. } => assert_eq!(content_id, CID),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn gateway_url_is_computed_without_a_request() {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server);
    let url = client.gateway_url(&ContentId::parse(CID).unwrap());
    assert!(url.ends_with(&format!("/ipfs/{CID}")));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

// ── DELETE /pinning/unpin/{cid} ──────────────────────────────────────

#[tokio::test]
async fn unpin_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/pinning/unpin/{CID}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.unpin(&ContentId::parse(CID).unwrap()).await.is_ok());
}

#[tokio::test]
async fn unpin_maps_404_to_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/pinning/unpin/{CID}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.unpin(&ContentId::parse(CID).unwrap()).await;
    assert!(matches!(result.unwrap_err(), PinServiceError::NotFound { .. }));
}

// ── GET /data/testAuthentication ─────────────────────────────────────

#[tokio::test]
async fn check_auth_accepts_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/testAuthentication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Congratulations! You are communicating with the API!"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(client.check_auth().await.is_ok());
}

#[tokio::test]
async fn check_auth_maps_403_to_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/testAuthentication"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    assert!(matches!(
        client.check_auth().await.unwrap_err(),
        PinServiceError::Unavailable { .. }
    ));
}
