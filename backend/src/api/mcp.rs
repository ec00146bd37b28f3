//! MCP Streamable HTTP endpoint handlers.
//!
//! Implements the MCP 2025-03-26 Streamable HTTP transport specification.
//!
//! ## Endpoints
//!
//! - `POST /mcp` - Send JSON-RPC requests; creates a session on initialize
//! - `GET /mcp` - Open SSE stream for server-initiated messages
//! - `DELETE /mcp` - Terminate a session
//!
//! Protocol errors come back as HTTP status plus a JSON-RPC error envelope
//! with the original message id echoed when available. A request carrying
//! an unknown session id is rejected; sessions are only ever created by an
//! initialize request with no session id.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Extension, Json,
};
use serde_json::{json, Value};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::{debug, error, info};

use crate::mcp::{
    auth,
    handler::{
        JsonRpcRequest, JsonRpcResponse, McpHandler, BAD_REQUEST, INTERNAL_ERROR, INVALID_REQUEST,
        PARSE_ERROR,
    },
    Session, SessionEvent, SessionRegistry,
};
use crate::state::AppState;

/// Header name for the MCP session ID.
pub const MCP_SESSION_ID_HEADER: &str = "mcp-session-id";

/// Extract the session ID from headers.
fn get_session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(MCP_SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Build a protocol error: HTTP status plus JSON-RPC error envelope,
/// echoing the message id or null.
fn rpc_error(status: StatusCode, code: i32, message: impl Into<String>, id: Option<Value>) -> Response {
    (
        status,
        Json(json!({
            "jsonrpc": "2.0",
            "error": {"code": code, "message": message.into()},
            "id": id.unwrap_or(Value::Null),
        })),
    )
        .into_response()
}

/// Serialize a handler response, attaching the session id header so
/// clients (and browsers, via CORS expose) can pick it up.
fn rpc_reply(response: &JsonRpcResponse, session_id: Option<&str>) -> Response {
    let body = match serde_json::to_string(response) {
        Ok(body) => body,
        Err(e) => {
            error!("MCP: Failed to serialize response: {}", e);
            return rpc_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR,
                "Internal server error",
                None,
            );
        }
    };

    let mut resp = (StatusCode::OK, body).into_response();
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    if let Some(sid) = session_id {
        if let Ok(hv) = HeaderValue::from_str(sid) {
            resp.headers_mut()
                .insert(HeaderName::from_static(MCP_SESSION_ID_HEADER), hv);
        }
    }
    resp
}

/// POST /mcp - Handle JSON-RPC requests.
///
/// Routes to the session named by the `Mcp-Session-Id` header, or creates
/// a new session for an initialize request without one. The credential is
/// re-resolved on every request: a freshly supplied key overwrites the
/// stored one, while a request carrying none leaves it untouched.
pub async fn mcp_post(
    State(state): State<AppState>,
    Extension(sessions): Extension<SessionRegistry>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            return rpc_error(
                StatusCode::BAD_REQUEST,
                PARSE_ERROR,
                format!("Parse error: {}", e),
                None,
            );
        }
    };
    let echo_id = value.get("id").cloned();
    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            return rpc_error(
                StatusCode::BAD_REQUEST,
                INVALID_REQUEST,
                format!("Invalid Request: {}", e),
                echo_id,
            );
        }
    };

    let session_id = get_session_id(&headers);
    debug!(
        "MCP POST: method={}, session={:?}",
        request.method, session_id
    );

    // Existing session: refresh credential if one was supplied, forward
    if let Some(sid) = session_id {
        if !sessions.exists(&sid).await {
            return rpc_error(
                StatusCode::BAD_REQUEST,
                BAD_REQUEST,
                "Bad Request: Unknown session ID",
                request.id,
            );
        }

        if let Some(key) = auth::from_request(&headers, Some(&request)) {
            sessions.set_credential(&sid, key).await;
        }
        let credential = sessions
            .credential(&sid)
            .await
            .or_else(|| state.config.api_key.clone());

        return match McpHandler::handle_request(&state, credential.as_deref(), request).await {
            Some(response) => rpc_reply(&response, Some(&sid)),
            // Notification - no response needed
            None => StatusCode::ACCEPTED.into_response(),
        };
    }

    // No session id: only an initialize request may create one
    if request.method == "initialize" {
        let credential =
            auth::resolve_credential(&headers, Some(&request), state.config.api_key.as_deref());
        if credential.is_none() {
            info!("MCP: Creating session in discovery mode (no API key yet)");
        }
        let session = Session::new(credential);
        let sid = session.id.clone();

        return match McpHandler::handle_request(&state, session.credential.as_deref(), request)
            .await
        {
            Some(response) if response.error.is_none() => {
                // Register only after the transport initialized successfully
                sessions.register(session).await;
                rpc_reply(&response, Some(&sid))
            }
            Some(response) => rpc_reply(&response, None),
            None => rpc_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR,
                "Internal server error",
                None,
            ),
        };
    }

    rpc_error(
        StatusCode::BAD_REQUEST,
        BAD_REQUEST,
        "Bad Request: Missing session ID or not an initialization request",
        request.id,
    )
}

/// GET /mcp - Open SSE stream for server-initiated messages.
///
/// Only valid for an existing session; this never creates one.
pub async fn mcp_get(
    Extension(sessions): Extension<SessionRegistry>,
    headers: HeaderMap,
) -> Response {
    let session_id = match get_session_id(&headers) {
        Some(id) => id,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Mcp-Session-Id header required for SSE stream"})),
            )
                .into_response();
        }
    };

    let rx = match sessions.subscribe(&session_id).await {
        Some(rx) => rx,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": "Session not found"})),
            )
                .into_response();
        }
    };

    info!("MCP: SSE stream opened for session {}", session_id);

    let stream = BroadcastStream::new(rx).filter_map(|result| {
        match result {
            Ok(SessionEvent::JsonRpc(json)) => Some(Ok::<_, Infallible>(Event::default().data(json))),
            Err(_) => None, // Lagged or closed
        }
    });

    Sse::new(stream)
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
        .into_response()
}

/// DELETE /mcp - Terminate a session.
///
/// Removal is unconditional; a subsequent request with the same id is
/// treated as unknown.
pub async fn mcp_delete(
    Extension(sessions): Extension<SessionRegistry>,
    headers: HeaderMap,
) -> Response {
    let session_id = match get_session_id(&headers) {
        Some(id) => id,
        None => return StatusCode::BAD_REQUEST.into_response(),
    };

    if sessions.terminate(&session_id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// OPTIONS /mcp - CORS preflight.
///
/// Actual preflights are answered by the CORS layer; this handler covers
/// plain OPTIONS probes so they also get a 204.
pub async fn mcp_options() -> StatusCode {
    StatusCode::NO_CONTENT
}
