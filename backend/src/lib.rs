//! UK company data MCP server library.
//!
//! This module exposes the application builder for use in tests.

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{
    routing::{delete, get, options, post},
    Extension, Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod mcp;
pub mod state;
pub mod tools;

use mcp::SessionRegistry;
use state::AppState;

/// Create the Axum application router.
///
/// This function is used both by the main server binary and by integration tests.
pub async fn create_app() -> Router {
    create_app_with_state(AppState::default()).await
}

/// Create the Axum application router with a given state.
pub async fn create_app_with_state(state: AppState) -> Router {
    create_app_with_config(state, SessionRegistry::new()).await
}

/// Create the Axum application router with a given state and session registry.
///
/// The registry is passed in so the server binary can keep a handle for
/// graceful shutdown, and so tests can inspect sessions directly.
///
/// If the configured CORS origin list is empty, any origin is allowed.
/// Otherwise, only the specified origins are allowed.
pub async fn create_app_with_config(state: AppState, sessions: SessionRegistry) -> Router {
    let cors_allowed_origins = state.config.cors_allowed_origins.clone();

    Router::new()
        .route("/health", get(health))
        .route("/mcp", post(api::mcp::mcp_post))
        .route("/mcp", get(api::mcp::mcp_get))
        .route("/mcp", delete(api::mcp::mcp_delete))
        .route("/mcp", options(api::mcp::mcp_options))
        .layer(Extension(sessions))
        .layer({
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    HeaderName::from_static("mcp-session-id"),
                    HeaderName::from_static("x-api-key"),
                    HeaderName::from_static("x-mcp-config"),
                    HeaderName::from_static("mcp-config"),
                ])
                .expose_headers([HeaderName::from_static("mcp-session-id")]);

            // If no origins specified, allow any origin
            // Otherwise, restrict to the specified origins
            if cors_allowed_origins.is_empty() {
                cors.allow_origin(Any)
            } else {
                let origins: Vec<HeaderValue> = cors_allowed_origins
                    .iter()
                    .filter_map(|o| o.parse::<HeaderValue>().ok())
                    .collect();
                cors.allow_origin(origins).allow_credentials(true)
            }
        })
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
