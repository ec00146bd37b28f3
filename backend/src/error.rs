//! Error types for upstream Companies House API calls.

use thiserror::Error;

/// Errors raised by [`crate::client::CompanyDataClient`].
///
/// These never cross the MCP boundary as-is: tool dispatch converts them
/// into in-band tool errors so a failed upstream call cannot take down the
/// session it ran under.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure (DNS, connect, timeout, body read).
    #[error("request to Companies House failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the key (HTTP 401/403).
    #[error("Companies House rejected the API key (HTTP {0})")]
    Unauthorized(u16),

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status from the API.
    #[error("Companies House returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
