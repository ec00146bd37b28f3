//! HTTP client for the Companies House REST API.
//!
//! One method per upstream operation. All requests authenticate with HTTP
//! basic auth, the API key as username and an empty password, which is the
//! scheme Companies House documents. Responses are passed through as raw
//! JSON; the MCP layer reserializes them for the calling agent.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use uk_company_types::api::{
    AdvancedCompanySearchParams, ChargeDetailsParams, CompanyNumberParams, DocumentParams,
    FilingHistoryItemParams, FilingHistoryParams, OfficerAppointmentParams,
    OfficerAppointmentsParams, OfficerIdParams, PagedCompanyParams, PscItemParams,
    PscStatementParams, PscSuperSecureParams, SearchParams,
};

use crate::error::ClientError;

/// Default base URL for the main Companies House API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.company-information.service.gov.uk";

/// Default base URL for the document API (separate host).
pub const DEFAULT_DOCUMENT_API_BASE_URL: &str =
    "https://document-api.company-information.service.gov.uk";

/// Client bound to a single API key.
///
/// Cheap to construct: the underlying `reqwest::Client` is shared via
/// `AppState`, so a new `CompanyDataClient` per tool call reuses the same
/// connection pool.
#[derive(Clone, Debug)]
pub struct CompanyDataClient {
    http: Client,
    base_url: String,
    document_base_url: String,
    api_key: String,
}

impl CompanyDataClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        document_base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            document_base_url: document_base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// GET a JSON resource from the main API.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.api_key, None::<&str>)
            .query(query)
            .send()
            .await?;
        Self::check_status(path, response).await?.json().await.map_err(ClientError::from)
    }

    /// Map non-success statuses onto the typed error taxonomy.
    async fn check_status(
        path: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        match status {
            s if s.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ClientError::Unauthorized(status.as_u16()))
            }
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(path.to_string())),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Search companies by name or number.
    pub async fn search_companies(&self, params: &SearchParams) -> Result<Value, ClientError> {
        let mut query = vec![("q", params.query.clone())];
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json("/search/companies", &query).await
    }

    /// Search officers by name across all companies.
    pub async fn search_officers(&self, params: &SearchParams) -> Result<Value, ClientError> {
        let mut query = vec![("q", params.query.clone())];
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json("/search/officers", &query).await
    }

    /// Search companies, officers, and disqualified officers in one call.
    pub async fn search_all(&self, params: &SearchParams) -> Result<Value, ClientError> {
        let mut query = vec![("q", params.query.clone())];
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json("/search", &query).await
    }

    /// Search disqualified officers by name.
    pub async fn search_disqualified_officers(
        &self,
        params: &SearchParams,
    ) -> Result<Value, ClientError> {
        let mut query = vec![("q", params.query.clone())];
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json("/search/disqualified-officers", &query).await
    }

    /// Alphabetical company name search. The endpoint pages by name
    /// boundaries rather than offsets, so only `size` maps over.
    pub async fn alphabetical_company_search(
        &self,
        params: &SearchParams,
    ) -> Result<Value, ClientError> {
        let mut query = vec![("q", params.query.clone())];
        if let Some(n) = params.items_per_page {
            query.push(("size", n.to_string()));
        }
        self.get_json("/alphabetical-search/companies", &query).await
    }

    /// Search dissolved companies.
    pub async fn dissolved_company_search(
        &self,
        params: &SearchParams,
    ) -> Result<Value, ClientError> {
        let mut query = vec![("q", params.query.clone())];
        if let Some(n) = params.items_per_page {
            query.push(("size", n.to_string()));
        }
        if let Some(n) = params.start_index {
            query.push(("start_index", n.to_string()));
        }
        self.get_json("/dissolved-search/companies", &query).await
    }

    /// Advanced company search with status/type/location/date/SIC filters.
    pub async fn advanced_company_search(
        &self,
        params: &AdvancedCompanySearchParams,
    ) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        push_opt(&mut query, "company_name_includes", &params.company_name);
        push_opt(&mut query, "company_status", &params.company_status);
        push_opt(&mut query, "company_type", &params.company_type);
        push_opt(&mut query, "location", &params.location);
        push_opt(&mut query, "incorporated_from", &params.incorporated_from);
        push_opt(&mut query, "incorporated_to", &params.incorporated_to);
        push_opt(&mut query, "sic_codes", &params.sic_codes);
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json("/advanced-search/companies", &query).await
    }

    // ========================================================================
    // Company
    // ========================================================================

    /// Full company profile (status, SIC codes, accounts dates).
    pub async fn company_profile(
        &self,
        params: &CompanyNumberParams,
    ) -> Result<Value, ClientError> {
        self.get_json(&format!("/company/{}", params.company_number), &[])
            .await
    }

    /// Registered office address.
    pub async fn registered_office_address(
        &self,
        params: &CompanyNumberParams,
    ) -> Result<Value, ClientError> {
        self.get_json(
            &format!("/company/{}/registered-office-address", params.company_number),
            &[],
        )
        .await
    }

    /// Company registers (where statutory registers are kept).
    pub async fn registers(&self, params: &CompanyNumberParams) -> Result<Value, ClientError> {
        self.get_json(&format!("/company/{}/registers", params.company_number), &[])
            .await
    }

    /// Insolvency case information.
    pub async fn insolvency(&self, params: &CompanyNumberParams) -> Result<Value, ClientError> {
        self.get_json(&format!("/company/{}/insolvency", params.company_number), &[])
            .await
    }

    /// UK establishments of an overseas company.
    pub async fn uk_establishments(
        &self,
        params: &CompanyNumberParams,
    ) -> Result<Value, ClientError> {
        self.get_json(
            &format!("/company/{}/uk-establishments", params.company_number),
            &[],
        )
        .await
    }

    /// Exemptions from PSC reporting.
    pub async fn exemptions(&self, params: &CompanyNumberParams) -> Result<Value, ClientError> {
        self.get_json(&format!("/company/{}/exemptions", params.company_number), &[])
            .await
    }

    // ========================================================================
    // Officers
    // ========================================================================

    /// Officers of a company (directors, secretaries, LLP members).
    pub async fn officers(&self, params: &PagedCompanyParams) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json(&format!("/company/{}/officers", params.company_number), &query)
            .await
    }

    /// All company appointments for one officer.
    pub async fn officer_appointments(
        &self,
        params: &OfficerAppointmentsParams,
    ) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json(&format!("/officers/{}/appointments", params.officer_id), &query)
            .await
    }

    /// One officer's appointment to one company.
    pub async fn officer_appointment(
        &self,
        params: &OfficerAppointmentParams,
    ) -> Result<Value, ClientError> {
        self.get_json(
            &format!(
                "/company/{}/appointments/{}",
                params.company_number, params.appointment_id
            ),
            &[],
        )
        .await
    }

    /// Disqualification record of a corporate officer.
    pub async fn corporate_officer_disqualification(
        &self,
        params: &OfficerIdParams,
    ) -> Result<Value, ClientError> {
        self.get_json(
            &format!("/disqualified-officers/corporate/{}", params.officer_id),
            &[],
        )
        .await
    }

    /// Disqualification record of a natural officer.
    pub async fn natural_officer_disqualification(
        &self,
        params: &OfficerIdParams,
    ) -> Result<Value, ClientError> {
        self.get_json(
            &format!("/disqualified-officers/natural/{}", params.officer_id),
            &[],
        )
        .await
    }

    // ========================================================================
    // Filing history
    // ========================================================================

    /// Filing history of a company, optionally filtered by category.
    pub async fn filing_history(&self, params: &FilingHistoryParams) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        push_opt(&mut query, "category", &params.category);
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json(
            &format!("/company/{}/filing-history", params.company_number),
            &query,
        )
        .await
    }

    /// A single filing history transaction.
    pub async fn filing_history_item(
        &self,
        params: &FilingHistoryItemParams,
    ) -> Result<Value, ClientError> {
        self.get_json(
            &format!(
                "/company/{}/filing-history/{}",
                params.company_number, params.transaction_id
            ),
            &[],
        )
        .await
    }

    // ========================================================================
    // Charges
    // ========================================================================

    /// Charges registered against a company.
    pub async fn charges(&self, params: &PagedCompanyParams) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json(&format!("/company/{}/charges", params.company_number), &query)
            .await
    }

    /// Details of a single charge.
    pub async fn charge_details(&self, params: &ChargeDetailsParams) -> Result<Value, ClientError> {
        self.get_json(
            &format!("/company/{}/charges/{}", params.company_number, params.charge_id),
            &[],
        )
        .await
    }

    // ========================================================================
    // Persons with significant control
    // ========================================================================

    /// Persons with significant control (beneficial owners).
    pub async fn persons_with_significant_control(
        &self,
        params: &PagedCompanyParams,
    ) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json(
            &format!(
                "/company/{}/persons-with-significant-control",
                params.company_number
            ),
            &query,
        )
        .await
    }

    /// One PSC sub-record, addressed by its kind segment in the URL.
    async fn psc_item(&self, kind: &str, params: &PscItemParams) -> Result<Value, ClientError> {
        self.get_json(
            &format!(
                "/company/{}/persons-with-significant-control/{}/{}",
                params.company_number, kind, params.psc_id
            ),
            &[],
        )
        .await
    }

    /// Individual PSC record.
    pub async fn psc_individual(&self, params: &PscItemParams) -> Result<Value, ClientError> {
        self.psc_item("individual", params).await
    }

    /// Individual beneficial owner record.
    pub async fn psc_individual_beneficial_owner(
        &self,
        params: &PscItemParams,
    ) -> Result<Value, ClientError> {
        self.psc_item("individual-beneficial-owner", params).await
    }

    /// Identity verification state of an individual PSC.
    pub async fn psc_individual_verification(
        &self,
        params: &PscItemParams,
    ) -> Result<Value, ClientError> {
        self.get_json(
            &format!(
                "/company/{}/persons-with-significant-control/individual/{}/verification-state",
                params.company_number, params.psc_id
            ),
            &[],
        )
        .await
    }

    /// Full record of an individual PSC, including protected details.
    pub async fn psc_individual_full_record(
        &self,
        params: &PscItemParams,
    ) -> Result<Value, ClientError> {
        self.get_json(
            &format!(
                "/company/{}/persons-with-significant-control/individual/{}/full_record",
                params.company_number, params.psc_id
            ),
            &[],
        )
        .await
    }

    /// Corporate entity PSC record.
    pub async fn psc_corporate_entity(
        &self,
        params: &PscItemParams,
    ) -> Result<Value, ClientError> {
        self.psc_item("corporate-entity", params).await
    }

    /// Corporate entity beneficial owner record.
    pub async fn psc_corporate_entity_beneficial_owner(
        &self,
        params: &PscItemParams,
    ) -> Result<Value, ClientError> {
        self.psc_item("corporate-entity-beneficial-owner", params)
            .await
    }

    /// Legal person PSC record.
    pub async fn psc_legal_person(&self, params: &PscItemParams) -> Result<Value, ClientError> {
        self.psc_item("legal-person", params).await
    }

    /// Legal person beneficial owner record.
    pub async fn psc_legal_person_beneficial_owner(
        &self,
        params: &PscItemParams,
    ) -> Result<Value, ClientError> {
        self.psc_item("legal-person-beneficial-owner", params).await
    }

    /// PSC statements of a company.
    pub async fn psc_statements(&self, params: &PagedCompanyParams) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        push_paging(&mut query, params.items_per_page, params.start_index);
        self.get_json(
            &format!(
                "/company/{}/persons-with-significant-control-statements",
                params.company_number
            ),
            &query,
        )
        .await
    }

    /// A single PSC statement.
    pub async fn psc_statement(&self, params: &PscStatementParams) -> Result<Value, ClientError> {
        self.get_json(
            &format!(
                "/company/{}/persons-with-significant-control-statements/{}",
                params.company_number, params.statement_id
            ),
            &[],
        )
        .await
    }

    /// Super-secure PSC record.
    pub async fn psc_super_secure(
        &self,
        params: &PscSuperSecureParams,
    ) -> Result<Value, ClientError> {
        self.get_json(
            &format!(
                "/company/{}/persons-with-significant-control/super-secure/{}",
                params.company_number, params.super_secure_id
            ),
            &[],
        )
        .await
    }

    /// Super-secure beneficial owner record.
    pub async fn psc_super_secure_beneficial_owner(
        &self,
        params: &PscSuperSecureParams,
    ) -> Result<Value, ClientError> {
        self.get_json(
            &format!(
                "/company/{}/persons-with-significant-control/super-secure-beneficial-owner/{}",
                params.company_number, params.super_secure_id
            ),
            &[],
        )
        .await
    }

    // ========================================================================
    // Documents (separate API host)
    // ========================================================================

    /// Document metadata (available formats, pages, filing association).
    pub async fn document_metadata(&self, params: &DocumentParams) -> Result<Value, ClientError> {
        let path = format!("/document/{}", params.document_id);
        let url = format!("{}{}", self.document_base_url, path);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.api_key, None::<&str>)
            .send()
            .await?;
        Self::check_status(&path, response)
            .await?
            .json()
            .await
            .map_err(ClientError::from)
    }

    /// Raw document content (binary, usually PDF).
    pub async fn document_content(&self, params: &DocumentParams) -> Result<Vec<u8>, ClientError> {
        let path = format!("/document/{}/content", params.document_id);
        let url = format!("{}{}", self.document_base_url, path);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.api_key, None::<&str>)
            .header(reqwest::header::ACCEPT, "application/pdf")
            .send()
            .await?;
        let bytes = Self::check_status(&path, response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Append `items_per_page`/`start_index` when present.
fn push_paging(
    query: &mut Vec<(&'static str, String)>,
    items_per_page: Option<u32>,
    start_index: Option<u32>,
) {
    if let Some(n) = items_per_page {
        query.push(("items_per_page", n.to_string()));
    }
    if let Some(n) = start_index {
        query.push(("start_index", n.to_string()));
    }
}

/// Append an optional string parameter when present.
fn push_opt(query: &mut Vec<(&'static str, String)>, name: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        query.push((name, v.clone()));
    }
}
