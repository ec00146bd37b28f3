//! MCP (Model Context Protocol) support.
//!
//! Implements the MCP 2025-03-26 Streamable HTTP transport plus a stdio
//! transport for single-tenant use. Sessions are identified by the
//! `Mcp-Session-Id` header, assigned during initialization and required
//! for every subsequent request; each session carries its own Companies
//! House API credential.

pub mod auth;
pub mod handler;
pub mod session;
pub mod stdio;

pub use handler::McpHandler;
pub use session::{Session, SessionEvent, SessionRegistry};
