//! MCP JSON-RPC request handler.
//!
//! Protocol-method handling shared by the HTTP transport and the stdio
//! transport. Tool calls are dispatched with the session's current
//! credential; every per-call failure (unknown tool, bad arguments,
//! missing credential, upstream error) comes back as a *successful*
//! JSON-RPC response carrying an in-band tool error, so the calling
//! agent can react without losing the session.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::state::AppState;
use crate::tools::ToolError;

/// MCP protocol version we support.
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// Server name advertised in the initialize result.
pub const SERVER_NAME: &str = "uk-company-data";

// JSON-RPC error codes
pub const BAD_REQUEST: i32 = -32000;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
pub const INVALID_REQUEST: i32 = -32600;
pub const PARSE_ERROR: i32 = -32700;

/// JSON-RPC 2.0 Request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 Response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// JSON-RPC 2.0 Error.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// Tool call parameters from MCP.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// MCP request handler. Stateless: session lookup and credential
/// resolution happen in the transport layer, which passes the effective
/// credential in explicitly.
pub struct McpHandler;

impl McpHandler {
    /// Handle an MCP JSON-RPC request. Returns `None` for notifications,
    /// which need no response.
    pub async fn handle_request(
        state: &AppState,
        credential: Option<&str>,
        request: JsonRpcRequest,
    ) -> Option<JsonRpcResponse> {
        let id = request.id.clone();
        debug!("MCP: Handling method: {}", request.method);

        match request.method.as_str() {
            "initialize" => Some(Self::handle_initialize(id)),
            "notifications/initialized" => None,
            "notifications/cancelled" => None,
            "ping" => Some(JsonRpcResponse::success(id, json!({}))),
            "tools/list" => Some(JsonRpcResponse::success(
                id,
                json!({"tools": state.tools().definitions()}),
            )),
            "tools/call" => {
                Some(Self::handle_call_tool(state, credential, id, request.params).await)
            }
            _ => Some(JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        }
    }

    /// Handle the initialize request.
    fn handle_initialize(id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    /// Handle a tools/call request.
    async fn handle_call_tool(
        state: &AppState,
        credential: Option<&str>,
        id: Option<Value>,
        params: Option<Value>,
    ) -> JsonRpcResponse {
        let params: ToolCallParams = match serde_json::from_value(params.unwrap_or(json!({}))) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    format!("Invalid tools/call params: {}", e),
                );
            }
        };
        let args = params.arguments.unwrap_or(json!({}));

        let client = credential.map(|key| state.client_for(key));
        match state.tools().dispatch(&params.name, args, client.as_ref()).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                warn!("MCP: Tool call '{}' failed: {}", params.name, e);
                JsonRpcResponse::success(id, tool_error_result(&e))
            }
        }
    }
}

/// Convert a tool failure into in-band error content.
fn tool_error_result(error: &ToolError) -> Value {
    json!({
        "content": [{"type": "text", "text": format!("Error: {}", error)}],
        "isError": true
    })
}
