//! Aggregation tests: listings degrade per record and per join, never
//! wholesale, and entries come back in the ledger's id order.

use std::time::Duration;

use acadledger_chain_client::{ChainClient, ChainGatewayConfig};
use acadledger_core::AccountAddress;
use acadledger_flows::{Counterpart, CredentialEntry, PrincipalRole, QueryAggregator, QueryError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOC_CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

fn subject_hex() -> String {
    format!("0x{}", "a".repeat(40))
}

fn issuer_hex() -> String {
    format!("0x{}", "b".repeat(40))
}

fn aggregator(chain_server: &MockServer) -> QueryAggregator {
    let config = ChainGatewayConfig::local_mock(&chain_server.uri()).unwrap();
    let account = AccountAddress::parse(&subject_hex()).unwrap();
    QueryAggregator::new(ChainClient::new(config, account).unwrap())
}

fn credential_json(id: u64, uri: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "subject": subject_hex(),
        "issuer": issuer_hex(),
        "program": "Computer Science",
        "level": "Bachelor",
        "issuedAt": 1764576000,
        "expiresAt": 0,
        "documentUri": uri,
        "documentHash": format!("0x{}", "ab".repeat(32)),
    })
}

async fn mount_ids(chain_server: &MockServer, ids: &[u64]) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/subjects/{}/credentials", subject_hex())))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(ids)))
        .mount(chain_server)
        .await;
}

async fn mount_named_institution(chain_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/institutions/{}", issuer_hex())))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({"name": "Polytechnic of Turin", "metadataUri": ""}),
        ))
        .mount(chain_server)
        .await;
}

// ── Empty and failing listings ───────────────────────────────────────

#[tokio::test]
async fn zero_credentials_yield_empty_listing_without_error() {
    let chain_server = MockServer::start().await;
    mount_ids(&chain_server, &[]).await;

    let entries = aggregator(&chain_server)
        .list_for_principal(&subject_hex(), PrincipalRole::Subject)
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn malformed_principal_fails_before_any_request() {
    let chain_server = MockServer::start().await;

    let result = aggregator(&chain_server)
        .list_for_principal("0xnope", PrincipalRole::Subject)
        .await;
    assert!(matches!(
        result.unwrap_err(),
        QueryError::InvalidPrincipal(_)
    ));
    assert!(chain_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn id_list_failure_fails_the_whole_call() {
    let chain_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/subjects/{}/credentials", subject_hex())))
        .respond_with(ResponseTemplate::new(500).set_body_string("node unavailable"))
        .mount(&chain_server)
        .await;

    let result = aggregator(&chain_server)
        .list_for_principal(&subject_hex(), PrincipalRole::Subject)
        .await;
    assert!(matches!(result.unwrap_err(), QueryError::IdList(_)));
}

// ── Per-record degradation ───────────────────────────────────────────

#[tokio::test]
async fn one_failed_fetch_yields_placeholder_preserving_order() {
    let chain_server = MockServer::start().await;
    mount_ids(&chain_server, &[7, 8, 9]).await;
    mount_named_institution(&chain_server).await;

    // Record 7 answers slowly so reassembly order is actually exercised.
    Mock::given(method("GET"))
        .and(path("/v1/credentials/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(credential_json(7, &format!("ipfs://{DOC_CID}")))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&chain_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/credentials/8"))
        .respond_with(ResponseTemplate::new(500).set_body_string("pruned state"))
        .mount(&chain_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/credentials/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential_json(9, "")))
        .mount(&chain_server)
        .await;

    let entries = aggregator(&chain_server)
        .list_for_principal(&subject_hex(), PrincipalRole::Subject)
        .await
        .unwrap();

    assert_eq!(entries.len(), 3);
    let ids: Vec<u64> = entries.iter().map(|e| e.id().value()).collect();
    assert_eq!(ids, vec![7, 8, 9]);
    assert!(entries[0].is_resolved());
    match &entries[1] {
        CredentialEntry::Unavailable { error, .. } => assert!(error.contains("500")),
        other => panic!("expected Unavailable, got: {other:?}"),
    }
    assert!(entries[2].is_resolved());
}

// ── Counterpart joins ────────────────────────────────────────────────

#[tokio::test]
async fn subject_listing_joins_issuer_institution() {
    let chain_server = MockServer::start().await;
    mount_ids(&chain_server, &[1]).await;
    mount_named_institution(&chain_server).await;
    Mock::given(method("GET"))
        .and(path("/v1/credentials/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(credential_json(1, &format!("ipfs://{DOC_CID}"))),
        )
        .mount(&chain_server)
        .await;

    let entries = aggregator(&chain_server)
        .list_for_principal(&subject_hex(), PrincipalRole::Subject)
        .await
        .unwrap();

    match &entries[0] {
        CredentialEntry::Resolved(resolved) => {
            match &resolved.counterpart {
                Counterpart::Institution(inst) => {
                    assert_eq!(inst.name, "Polytechnic of Turin")
                }
                other => panic!("expected Institution, got: {other:?}"),
            }
            assert_eq!(resolved.document_ref.as_ref().unwrap().as_str(), DOC_CID);
        }
        other => panic!("expected Resolved, got: {other:?}"),
    }
}

#[tokio::test]
async fn unregistered_counterpart_is_marked_not_fatal() {
    let chain_server = MockServer::start().await;
    mount_ids(&chain_server, &[1]).await;
    // Empty name: issuer never registered.
    Mock::given(method("GET"))
        .and(path(format!("/v1/institutions/{}", issuer_hex())))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"name": "", "metadataUri": ""})),
        )
        .mount(&chain_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/credentials/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential_json(1, "")))
        .mount(&chain_server)
        .await;

    let entries = aggregator(&chain_server)
        .list_for_principal(&subject_hex(), PrincipalRole::Subject)
        .await
        .unwrap();

    match &entries[0] {
        CredentialEntry::Resolved(resolved) => {
            match &resolved.counterpart {
                Counterpart::Unregistered { address } => {
                    assert_eq!(address.as_str(), issuer_hex())
                }
                other => panic!("expected Unregistered, got: {other:?}"),
            }
            assert!(resolved.counterpart.display_name().contains("unregistered"));
            // Empty uri: no preview reference.
            assert!(resolved.document_ref.is_none());
        }
        other => panic!("expected Resolved, got: {other:?}"),
    }
}

#[tokio::test]
async fn issuer_listing_joins_subject_profiles() {
    let chain_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/institutions/{}/credentials", issuer_hex())))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([4])))
        .mount(&chain_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/credentials/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential_json(4, "")))
        .mount(&chain_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/subjects/{}", subject_hex())))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Ada Lovelace",
            "externalId": "2023001",
            "metadataUri": "",
            "active": true,
            "registeredAt": 1700000000
        })))
        .mount(&chain_server)
        .await;

    let entries = aggregator(&chain_server)
        .list_for_principal(&issuer_hex(), PrincipalRole::Issuer)
        .await
        .unwrap();

    match &entries[0] {
        CredentialEntry::Resolved(resolved) => match &resolved.counterpart {
            Counterpart::Subject(subj) => {
                assert_eq!(subj.name, "Ada Lovelace");
                assert_eq!(subj.external_id, "2023001");
            }
            other => panic!("expected Subject, got: {other:?}"),
        },
        other => panic!("expected Resolved, got: {other:?}"),
    }
}

#[tokio::test]
async fn counterpart_transport_failure_degrades_to_unregistered() {
    let chain_server = MockServer::start().await;
    mount_ids(&chain_server, &[1]).await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/institutions/{}", issuer_hex())))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&chain_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/credentials/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential_json(1, "")))
        .mount(&chain_server)
        .await;

    let entries = aggregator(&chain_server)
        .list_for_principal(&subject_hex(), PrincipalRole::Subject)
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    match &entries[0] {
        CredentialEntry::Resolved(resolved) => {
            assert!(matches!(
                resolved.counterpart,
                Counterpart::Unregistered { .. }
            ));
        }
        other => panic!("expected Resolved, got: {other:?}"),
    }
}

#[tokio::test]
async fn large_listing_is_reassembled_in_ledger_order() {
    let chain_server = MockServer::start().await;
    let ids: Vec<u64> = (1..=20).collect();
    mount_ids(&chain_server, &ids).await;
    mount_named_institution(&chain_server).await;

    for id in &ids {
        // Stagger delays so completion order differs from spawn order.
        let delay = Duration::from_millis(if id % 3 == 0 { 120 } else { 10 });
        Mock::given(method("GET"))
            .and(path(format!("/v1/credentials/{id}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(credential_json(*id, ""))
                    .set_delay(delay),
            )
            .mount(&chain_server)
            .await;
    }

    let entries = aggregator(&chain_server)
        .list_for_principal(&subject_hex(), PrincipalRole::Subject)
        .await
        .unwrap();

    let got: Vec<u64> = entries.iter().map(|e| e.id().value()).collect();
    assert_eq!(got, ids);
    assert!(entries.iter().all(CredentialEntry::is_resolved));
}
