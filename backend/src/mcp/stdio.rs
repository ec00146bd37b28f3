//! Stdio transport for single-tenant deployments.
//!
//! Reads line-delimited JSON-RPC from stdin and writes responses to
//! stdout, the way MCP hosts spawn local servers. There is no session
//! registry here: the process-wide API key is the only credential, and
//! requiring it up front is the one startup condition treated as fatal.

use anyhow::bail;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use crate::mcp::handler::{JsonRpcRequest, JsonRpcResponse, McpHandler, PARSE_ERROR};
use crate::state::AppState;

/// Run the MCP server over stdin/stdout until stdin closes.
pub async fn run(state: AppState) -> anyhow::Result<()> {
    if state.config.api_key.is_none() {
        bail!(
            "an API key is required in stdio mode: set COMPANIES_HOUSE_API_KEY \
             or pass --api-key"
        );
    }

    info!("MCP server started on stdio ({} tools)", state.tools().len());

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut stdout = tokio::io::stdout();
    let mut line = String::new();

    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            info!("MCP server shutting down (stdin closed)");
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
            Ok(request) => {
                let credential = state.config.api_key.as_deref();
                McpHandler::handle_request(&state, credential, request).await
            }
            Err(e) => {
                warn!("MCP: Unparseable request line: {}", e);
                Some(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))
            }
        };

        if let Some(response) = response {
            let serialized = serde_json::to_string(&response)?;
            stdout.write_all(serialized.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
