//! Shared application state.

use std::sync::Arc;

use crate::client::CompanyDataClient;
use crate::config::Config;
use crate::tools::ToolRegistry;

/// State injected into every request handler.
///
/// Owns the configuration, the shared HTTP connection pool, and the
/// immutable tool registry built once at startup. Session state lives in
/// [`crate::mcp::SessionRegistry`], which is injected separately so its
/// lifecycle stays explicit.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    http: reqwest::Client,
    tools: Arc<ToolRegistry>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
            tools: Arc::new(ToolRegistry::new()),
        }
    }

    /// The tool registry.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Build a Companies House client bound to the given API key,
    /// reusing the shared connection pool.
    pub fn client_for(&self, api_key: &str) -> CompanyDataClient {
        CompanyDataClient::new(
            self.http.clone(),
            &self.config.api_base_url,
            &self.config.document_api_base_url,
            api_key,
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
