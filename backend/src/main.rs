//! UK company data MCP server.

use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use uk_company_mcp::{
    config::Config, create_app_with_config, mcp, mcp::SessionRegistry, state::AppState,
};

/// MCP server for the UK Companies House public data API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port for the HTTP transport
    #[arg(short, long)]
    port: Option<u16>,

    /// Companies House API key used when a session supplies none
    #[arg(long, env = "COMPANIES_HOUSE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Serve MCP over stdin/stdout instead of HTTP
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (files, env, CLI overrides)
    let config = Config::from_figment(args.port, args.api_key)?;

    // Initialize logging - use RUST_LOG env var, then config, default to info
    let default_level = config.log_level.clone().unwrap_or_else(|| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if args.stdio {
        // stdout carries the protocol in stdio mode, so logs go to stderr
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    let state = AppState::new(config);

    if args.stdio {
        return mcp::stdio::run(state).await;
    }

    if state.config.api_key.is_none() {
        info!("No process-wide API key configured; sessions must supply their own");
    }

    let port = state.config.port;
    let sessions = SessionRegistry::new();
    let app = create_app_with_config(state, sessions.clone()).await;

    // Bind to 0.0.0.0 to be accessible from all interfaces
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MCP server listening on {}", addr);
    info!("MCP endpoint available at http://{}/mcp", addr);

    let shutdown_signal = async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
        sessions.shutdown().await;
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
