//! Tool parameter types.
//!
//! Each struct corresponds to the input schema of one MCP tool and maps
//! onto the query/path parameters of a Companies House API operation.
//! Paginated list operations accept `items_per_page` and `start_index`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Search
// ============================================================================

/// Parameters for free-text search operations (companies, officers,
/// disqualified officers, or everything at once).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Search term (company name, number, or officer name).
    pub query: String,
    /// Results per page (1-100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    /// Pagination start index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
}

/// Parameters for the advanced company search with filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvancedCompanySearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Incorporation date range start (YYYY-MM-DD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incorporated_from: Option<String>,
    /// Incorporation date range end (YYYY-MM-DD).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incorporated_to: Option<String>,
    /// Comma-separated SIC codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sic_codes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
}

// ============================================================================
// Company
// ============================================================================

/// Parameters for operations addressing a single company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyNumberParams {
    /// 8-character company number.
    pub company_number: String,
}

/// Parameters for paginated per-company listings (officers, PSCs, charges).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedCompanyParams {
    /// 8-character company number.
    pub company_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
}

// ============================================================================
// Filing history
// ============================================================================

/// Parameters for listing a company's filing history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingHistoryParams {
    pub company_number: String,
    /// Filing category filter (accounts, confirmation-statement, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
}

/// Parameters for fetching a single filing history transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingHistoryItemParams {
    pub company_number: String,
    /// Transaction ID from the filing history list.
    pub transaction_id: String,
}

// ============================================================================
// Charges
// ============================================================================

/// Parameters for fetching the details of a single charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeDetailsParams {
    pub company_number: String,
    /// Charge ID from the charges list.
    pub charge_id: String,
}

// ============================================================================
// Officers
// ============================================================================

/// Parameters for listing all appointments of one officer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficerAppointmentsParams {
    /// Officer ID from search results.
    pub officer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
}

/// Parameters for fetching one officer's appointment to one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficerAppointmentParams {
    pub company_number: String,
    /// Appointment ID from the company's officer list.
    pub appointment_id: String,
}

/// Parameters addressing one officer by ID (disqualification records).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficerIdParams {
    /// Officer ID from search results.
    pub officer_id: String,
}

// ============================================================================
// Persons with significant control
// ============================================================================

/// Parameters addressing one PSC record of a known kind (individual,
/// corporate entity, legal person, or a beneficial-owner variant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PscItemParams {
    pub company_number: String,
    /// PSC ID from the PSC list's links.
    pub psc_id: String,
}

/// Parameters for fetching a single PSC statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PscStatementParams {
    pub company_number: String,
    /// Statement ID from the statements list.
    pub statement_id: String,
}

/// Parameters for a super-secure PSC record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PscSuperSecureParams {
    pub company_number: String,
    /// Super-secure PSC ID from the PSC list's links.
    pub super_secure_id: String,
}

// ============================================================================
// Documents
// ============================================================================

/// Parameters for document metadata and content fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentParams {
    /// Document ID from a filing history item's links.
    pub document_id: String,
}
