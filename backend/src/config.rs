//! Configuration management.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;

use crate::client::{DEFAULT_API_BASE_URL, DEFAULT_DOCUMENT_API_BASE_URL};

/// Environment variable honoured as the process-wide fallback API key,
/// kept verbatim for compatibility with existing deployments.
pub const FALLBACK_API_KEY_ENV: &str = "COMPANIES_HOUSE_API_KEY";

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    upstream: UpstreamConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_port")]
    port: u16,
    /// Allowed CORS origins; empty means any origin.
    #[serde(default)]
    cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct UpstreamConfig {
    /// Fallback API key for single-tenant deployments.
    api_key: Option<String>,
    api_base_url: Option<String>,
    document_api_base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    /// If not set, uses RUST_LOG environment variable or defaults to "info".
    log_level: Option<String>,
}

fn default_port() -> u16 {
    uk_company_types::DEFAULT_PORT
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Process-wide fallback API key. Per-session credentials supplied over
    /// HTTP take priority; this is the last resort in the resolver chain.
    pub api_key: Option<String>,
    /// Base URL for the main Companies House API.
    pub api_base_url: String,
    /// Base URL for the document API.
    pub document_api_base_url: String,
    /// Allowed CORS origins; empty means any origin.
    pub cors_allowed_origins: Vec<String>,
    /// Log level override.
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with full priority chain: CLI args > env vars > config files > defaults.
    ///
    /// Config files are searched in this order:
    /// 1. `.uk-company-mcp.toml` in the current directory
    /// 2. `config.toml` in the user config directory
    ///    (`~/.config/uk-company-mcp/` on Linux)
    ///
    /// Environment variables use the `UK_COMPANY_` prefix with `__` as the
    /// section separator, e.g. `UK_COMPANY_SERVER__PORT=8080`. The bare
    /// `COMPANIES_HOUSE_API_KEY` variable is additionally honoured as the
    /// fallback key.
    pub fn from_figment(port: Option<u16>, api_key: Option<String>) -> anyhow::Result<Self> {
        let local_config = std::env::current_dir()
            .ok()
            .map(|d| d.join(".uk-company-mcp.toml"));
        let user_config = directories::ProjectDirs::from("", "", "uk-company-mcp")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        let mut figment = Figment::new().merge(Serialized::defaults(ConfigFile {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
        }));

        if let Some(ref path) = user_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(ref path) = local_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("UK_COMPANY_").split("__"));

        // CLI arguments have the highest priority
        if let Some(p) = port {
            figment = figment.merge(Serialized::default("server.port", p));
        }
        if let Some(ref key) = api_key {
            figment = figment.merge(Serialized::default("upstream.api_key", key));
        }

        let config_file: ConfigFile = figment.extract()?;

        // Compatibility fallback for the original deployment variable
        let api_key = config_file
            .upstream
            .api_key
            .or_else(|| env::var(FALLBACK_API_KEY_ENV).ok());

        Ok(Self {
            port: config_file.server.port,
            api_key,
            api_base_url: config_file
                .upstream
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            document_api_base_url: config_file
                .upstream
                .document_api_base_url
                .unwrap_or_else(|| DEFAULT_DOCUMENT_API_BASE_URL.to_string()),
            cors_allowed_origins: config_file.server.cors_allowed_origins,
            log_level: config_file.logging.log_level,
        })
    }

    /// Load configuration from environment variables only.
    ///
    /// Primarily for tests and embedding; the binary uses `from_figment`.
    pub fn from_env() -> Self {
        let port = env::var("UK_COMPANY_SERVER__PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let api_key = env::var("UK_COMPANY_UPSTREAM__API_KEY")
            .ok()
            .or_else(|| env::var(FALLBACK_API_KEY_ENV).ok());

        Self {
            port,
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            document_api_base_url: DEFAULT_DOCUMENT_API_BASE_URL.to_string(),
            cors_allowed_origins: Vec::new(),
            log_level: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
