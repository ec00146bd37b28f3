//! Shared types for the UK Company Data MCP server.
//!
//! This crate contains the validated parameter types for every tool
//! operation exposed over MCP, matching the query parameters of the
//! Companies House REST API.

/// Default port for the MCP server.
pub const DEFAULT_PORT: u16 = 3000;

pub mod api;

// Re-export commonly used types
pub use api::{
    AdvancedCompanySearchParams, ChargeDetailsParams, CompanyNumberParams, DocumentParams,
    FilingHistoryItemParams, FilingHistoryParams, OfficerAppointmentParams,
    OfficerAppointmentsParams, OfficerIdParams, PagedCompanyParams, PscItemParams,
    PscStatementParams, PscSuperSecureParams, SearchParams,
};
