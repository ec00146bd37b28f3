//! Integration tests for the MCP Streamable HTTP transport.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use base64::Engine;
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`
use uk_company_mcp::{
    config::Config,
    create_app_with_config,
    mcp::SessionRegistry,
    state::AppState,
};

/// Helper to create a test app instance with a handle on the registry.
///
/// The upstream base URL points at an unroutable port so tool calls fail
/// fast with a connection error instead of touching the network.
async fn create_test_app() -> (Router, SessionRegistry) {
    let config = Config {
        port: 0,
        api_key: None,
        api_base_url: "http://127.0.0.1:9".to_string(),
        document_api_base_url: "http://127.0.0.1:9".to_string(),
        cors_allowed_origins: Vec::new(),
        log_level: None,
    };
    let sessions = SessionRegistry::new();
    let app = create_app_with_config(AppState::new(config), sessions.clone()).await;
    (app, sessions)
}

fn initialize_body() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-03-26",
            "clientInfo": {"name": "test-client", "version": "0.0.1"}
        }
    })
}

async fn post_mcp(
    app: &Router,
    body: &Value,
    session_id: Option<&str>,
    extra_headers: &[(&str, &str)],
) -> Response {
    let mut builder = Request::builder()
        .uri("/mcp")
        .method("POST")
        .header("content-type", "application/json");
    if let Some(sid) = session_id {
        builder = builder.header("mcp-session-id", sid);
    }
    for (name, value) in extra_headers {
        builder = builder.header(*name, *value);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Initialize a session and return its id.
async fn initialize_session(app: &Router, extra_headers: &[(&str, &str)]) -> String {
    let response = post_mcp(app, &initialize_body(), None, extra_headers).await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .headers()
        .get("mcp-session-id")
        .expect("initialize should return a session id")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_initialize_creates_session() {
    let (app, sessions) = create_test_app().await;

    let response = post_mcp(&app, &initialize_body(), None, &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("mcp-session-id"));

    let body = body_json(response).await;
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(body["result"]["serverInfo"]["name"], "uk-company-data");

    assert_eq!(sessions.count().await, 1);
}

#[tokio::test]
async fn test_session_ids_are_unique() {
    let (app, _) = create_test_app().await;

    let first = initialize_session(&app, &[]).await;
    let second = initialize_session(&app, &[]).await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_request_without_session_is_rejected() {
    let (app, sessions) = create_test_app().await;

    let body = json!({"jsonrpc": "2.0", "id": 5, "method": "tools/list"});
    let response = post_mcp(&app, &body, None, &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], -32000);
    assert_eq!(body["id"], 5);

    // Nothing was created as a side effect
    assert_eq!(sessions.count().await, 0);
}

#[tokio::test]
async fn test_unknown_session_is_never_recreated() {
    let (app, sessions) = create_test_app().await;

    let stale = "0c7b9a52-0000-0000-0000-000000000000";

    let body = json!({"jsonrpc": "2.0", "id": 2, "method": "ping"});
    let response = post_mcp(&app, &body, Some(stale), &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], -32000);

    // Even an initialize request cannot resurrect a stale id
    let response = post_mcp(&app, &initialize_body(), Some(stale), &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(sessions.count().await, 0);
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let (app, _) = create_test_app().await;

    let request = Request::builder()
        .uri("/mcp")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from("{not valid json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], -32700);
    assert!(body["id"].is_null());
}

#[tokio::test]
async fn test_invalid_envelope_echoes_id() {
    let (app, _) = create_test_app().await;

    // Valid JSON, but not a JSON-RPC request
    let body = json!({"id": 7, "params": {}});
    let response = post_mcp(&app, &body, None, &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(body["id"], 7);
}

#[tokio::test]
async fn test_discovery_mode_lists_tools() {
    let (app, sessions) = create_test_app().await;

    // No credential anywhere: session still opens for discovery
    let sid = initialize_session(&app, &[]).await;
    assert_eq!(sessions.credential(&sid).await, None);

    let body = json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"});
    let response = post_mcp(&app, &body, Some(&sid), &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let tools = body["result"]["tools"].as_array().unwrap();
    assert!(!tools.is_empty());
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"search_companies"));
    assert!(names.contains(&"get_company_profile"));
    assert!(names.contains(&"get_filing_history"));
    assert!(names.contains(&"get_psc_individual"));
    assert!(names.contains(&"get_natural_officer_disqualification"));
}

#[tokio::test]
async fn test_call_without_credential_is_in_band_error() {
    let (app, _) = create_test_app().await;
    let sid = initialize_session(&app, &[]).await;

    let body = json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {"name": "search_companies", "arguments": {"query": "Tesco"}}
    });
    let response = post_mcp(&app, &body, Some(&sid), &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["error"].is_null());
    assert_eq!(body["result"]["isError"], true);
    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("API key"), "unexpected text: {}", text);
}

#[tokio::test]
async fn test_provider_failure_keeps_session_usable() {
    let (app, _) = create_test_app().await;
    let sid = initialize_session(&app, &[("x-api-key", "test-key")]).await;

    // Upstream is unreachable, so the call fails in-band
    let body = json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {"name": "get_company_profile", "arguments": {"company_number": "00000006"}}
    });
    let response = post_mcp(&app, &body, Some(&sid), &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"]["isError"], true);

    // The failure did not tear down the session
    let ping = json!({"jsonrpc": "2.0", "id": 4, "method": "ping"});
    let response = post_mcp(&app, &ping, Some(&sid), &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"], json!({}));
}

#[tokio::test]
async fn test_credential_refresh_last_supplied_wins() {
    let (app, sessions) = create_test_app().await;

    let sid = initialize_session(&app, &[("x-api-key", "key-a")]).await;
    assert_eq!(sessions.credential(&sid).await, Some("key-a".to_string()));

    // A new key on a later request replaces the stored one
    let ping = json!({"jsonrpc": "2.0", "id": 2, "method": "ping"});
    let response = post_mcp(&app, &ping, Some(&sid), &[("x-api-key", "key-b")]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(sessions.credential(&sid).await, Some("key-b".to_string()));

    // A request with no key leaves the stored one untouched
    let response = post_mcp(&app, &ping, Some(&sid), &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(sessions.credential(&sid).await, Some("key-b".to_string()));
}

#[tokio::test]
async fn test_config_header_credential() {
    let (app, sessions) = create_test_app().await;

    let config = r#"{"apiKey": "from-config-header"}"#;
    let sid = initialize_session(&app, &[("x-mcp-config", config)]).await;
    assert_eq!(
        sessions.credential(&sid).await,
        Some("from-config-header".to_string())
    );
}

#[tokio::test]
async fn test_basic_auth_credential() {
    let (app, sessions) = create_test_app().await;

    // Companies House style: key as username, empty password
    let encoded = base64::engine::general_purpose::STANDARD.encode("basic-key:");
    let header = format!("Basic {}", encoded);
    let sid = initialize_session(&app, &[("authorization", header.as_str())]).await;
    assert_eq!(sessions.credential(&sid).await, Some("basic-key".to_string()));
}

#[tokio::test]
async fn test_header_outranks_initialize_params() {
    let (app, sessions) = create_test_app().await;

    let mut body = initialize_body();
    body["params"]["clientInfo"]["config"] = json!({"apiKey": "from-params"});

    let response = post_mcp(&app, &body, None, &[("x-api-key", "from-header")]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let sid = response
        .headers()
        .get("mcp-session-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        sessions.credential(&sid).await,
        Some("from-header".to_string())
    );
}

#[tokio::test]
async fn test_notification_is_accepted_without_body() {
    let (app, _) = create_test_app().await;
    let sid = initialize_session(&app, &[]).await;

    let body = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    let response = post_mcp(&app, &body, Some(&sid), &[]).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_delete_terminates_session() {
    let (app, sessions) = create_test_app().await;
    let sid = initialize_session(&app, &[]).await;
    assert_eq!(sessions.count().await, 1);

    let request = Request::builder()
        .uri("/mcp")
        .method("DELETE")
        .header("mcp-session-id", sid.as_str())
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(sessions.count().await, 0);

    // The terminated id is now unknown
    let ping = json!({"jsonrpc": "2.0", "id": 2, "method": "ping"});
    let response = post_mcp(&app, &ping, Some(&sid), &[]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Deleting again reports not found
    let request = Request::builder()
        .uri("/mcp")
        .method("DELETE")
        .header("mcp-session-id", sid.as_str())
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_session_header() {
    let (app, _) = create_test_app().await;

    let request = Request::builder()
        .uri("/mcp")
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sse_stream_requires_known_session() {
    let (app, _) = create_test_app().await;

    let request = Request::builder()
        .uri("/mcp")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .uri("/mcp")
        .method("GET")
        .header("mcp-session-id", "not-a-session")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let sid = initialize_session(&app, &[]).await;
    let request = Request::builder()
        .uri("/mcp")
        .method("GET")
        .header("mcp-session-id", sid.as_str())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));
}

#[tokio::test]
async fn test_options_probe_returns_no_content() {
    let (app, _) = create_test_app().await;

    let request = Request::builder()
        .uri("/mcp")
        .method("OPTIONS")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
