//! End-to-end tests of the client pipeline against a mock server:
//! translation, auth headers, status handling, and normalization.

use satgate_client::api::ApiClient;
use satgate_client::model::SpendReport;
use satgate_client::money::Money;
use satgate_client::request::{MintRequest, RouteAllowlist};
use satgate_client::ApiError;
use satgate_config::{Config, Surface};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_config(url: &str) -> Config {
    Config {
        surface: Surface::Gateway,
        gateway: url.to_string(),
        admin_token: "admin-secret".to_string(),
        bearer_token: String::new(),
        tenant: String::new(),
        format: "table".to_string(),
    }
}

fn cloud_config(url: &str) -> Config {
    Config {
        surface: Surface::Cloud,
        gateway: url.to_string(),
        admin_token: String::new(),
        bearer_token: "cloud-secret".to_string(),
        tenant: "acme".to_string(),
        format: "table".to_string(),
    }
}

#[tokio::test]
async fn gateway_list_tokens_sends_admin_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/tokens"))
        .and(header("X-Admin-Token", "admin-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tokens": [
                {"id": "tok_1", "name": "crawler", "status": "active",
                 "spent": 4.5, "budget": 20.0}
            ]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::from_config(&gateway_config(&server.uri())).unwrap();
    let tokens = client.list_tokens().await.unwrap().result.known().unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].spent, Money::from_cents(450));
}

#[tokio::test]
async fn cloud_mint_translates_budget_to_credits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cloud/delegation-v2/delegate"))
        .and(header("Authorization", "Bearer cloud-secret"))
        .and(header("X-SatGate-Tenant", "acme"))
        .and(body_partial_json(json!({
            "name": "crawler",
            "budget_limit_credits": 1999,
            "scope": {"routes": ["*"]}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "token": {"id": "tok_9", "status": "active"},
            "macaroon_token": "MDAxb..."
        })))
        .mount(&server)
        .await;

    let client = ApiClient::from_config(&cloud_config(&server.uri())).unwrap();
    let req = MintRequest {
        agent: "crawler".to_string(),
        budget: Money::from_dollars(19.99),
        routes: RouteAllowlist::All,
        ..MintRequest::default()
    };
    let receipt = client.mint(&req).await.unwrap().result.known().unwrap();
    assert_eq!(receipt.id.as_deref(), Some("tok_9"));
    assert_eq!(receipt.macaroon.as_deref(), Some("MDAxb..."));
}

#[tokio::test]
async fn mint_with_empty_agent_never_reaches_the_network() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and fail the accept check,
    // but validation must reject the request first.
    let client = ApiClient::from_config(&gateway_config(&server.uri())).unwrap();
    let err = client.mint(&MintRequest::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn revoke_404_reports_token_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/tokens/tok_missing/revoke"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ApiClient::from_config(&gateway_config(&server.uri())).unwrap();
    let err = client.revoke("tok_missing").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(id) if id == "tok_missing"));
}

#[tokio::test]
async fn display_name_lookup_failure_does_not_block_revoke() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/tokens/tok_1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/tokens/tok_1/revoke"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = ApiClient::from_config(&gateway_config(&server.uri())).unwrap();
    // Lookup fails; the name degrades to the raw id
    assert_eq!(client.display_name("tok_1").await, "tok_1");
    // The destructive call still goes through afterwards
    client.revoke("tok_1").await.unwrap();
}

#[tokio::test]
async fn display_name_enriches_with_agent_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/tokens/tok_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "tok_1", "name": "crawler", "status": "active"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::from_config(&gateway_config(&server.uri())).unwrap();
    assert_eq!(client.display_name("tok_1").await, "tok_1 (crawler)");
}

#[tokio::test]
async fn gateway_spend_passes_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/spend"))
        .and(query_param("agent", "crawler"))
        .and(query_param("period", "7d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_allocated": 100.0,
            "total_consumed": 25.0,
            "agents": [{"name": "crawler", "spent": 25.0, "budget": 50.0}]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::from_config(&gateway_config(&server.uri())).unwrap();
    let report = client
        .spend(Some("crawler"), Some("7d"))
        .await
        .unwrap()
        .result
        .known()
        .unwrap();
    let SpendReport::Org(org) = report else {
        panic!("expected org summary");
    };
    assert_eq!(org.total_consumed, Money::from_cents(2500));
}

#[tokio::test]
async fn cloud_rollups_normalize_to_dollars() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cloud/delegation-v2/cost-rollups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rollups": [{
                "costCenter": "ml-infra", "department": "eng",
                "totalConsumed": 2500, "totalAllocated": 10000
            }]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::from_config(&cloud_config(&server.uri())).unwrap();
    let report = client.spend(None, None).await.unwrap().result.known().unwrap();
    let SpendReport::CostCenters(rollups) = report else {
        panic!("expected rollups");
    };
    assert_eq!(rollups[0].consumed.to_string(), "$25.00");
    assert_eq!(rollups[0].allocated.to_string(), "$100.00");
    assert!((rollups[0].percent_used - 25.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn unexpected_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/tokens"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = ApiClient::from_config(&gateway_config(&server.uri())).unwrap();
    let err = client.list_tokens().await.unwrap_err();
    match err {
        ApiError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn health_paths_differ_by_surface() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let client = ApiClient::from_config(&cloud_config(&server.uri())).unwrap();
    let (status, body) = client.health().await.unwrap();
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unreachable_target_is_a_transport_error() {
    // Port 9 is discard; nothing listens there
    let client = ApiClient::from_config(&gateway_config("http://127.0.0.1:9")).unwrap();
    let err = client.list_tokens().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
    assert!(err.to_string().contains("127.0.0.1:9"));
}
