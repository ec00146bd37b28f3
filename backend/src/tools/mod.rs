//! Tool registry and dispatch.
//!
//! Every MCP tool is a [`ToolDef`] record: name, description, JSON input
//! schema, and the bound handler. The registry is built once at startup
//! and indexed by name for O(1) dispatch; a duplicate name is a startup
//! bug and panics immediately rather than shadowing a handler.
//!
//! Handlers validate raw arguments against their parameter type, invoke
//! exactly one Companies House operation, and reserialize the result as
//! text content. Every failure mode surfaces as a [`ToolError`], which
//! the JSON-RPC layer converts into an in-band tool error so a failed
//! call never takes down its session.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

use crate::client::CompanyDataClient;
use crate::error::ClientError;

pub mod charges;
pub mod company;
pub mod documents;
pub mod filings;
pub mod officers;
pub mod ownership;
pub mod search;

/// Errors from a single tool call. Per-call only: these are reported to
/// the agent as text and never abort the session or the transport.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(serde_json::Error),

    #[error(
        "no Companies House API key configured for this session. Provide one via the \
         x-api-key header, an x-mcp-config header, or the COMPANIES_HOUSE_API_KEY \
         environment variable"
    )]
    MissingCredential,

    #[error("{0}")]
    Provider(#[from] ClientError),

    #[error("failed to serialize result: {0}")]
    Serialize(serde_json::Error),
}

pub type ToolResult = Result<Value, ToolError>;

/// Boxed future returned by a tool handler.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = ToolResult> + Send + 'a>>;

/// A tool handler: validated-args in, MCP content out.
pub type Handler = for<'a> fn(&'a CompanyDataClient, Value) -> HandlerFuture<'a>;

/// Static definition of one tool, with its handler bound at construction
/// so a declared tool can never be missing an implementation.
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub handler: Handler,
}

/// Immutable, ordered collection of all tools, built once at startup.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        let mut tools = Vec::new();
        tools.extend(search::tools());
        tools.extend(company::tools());
        tools.extend(officers::tools());
        tools.extend(filings::tools());
        tools.extend(charges::tools());
        tools.extend(ownership::tools());
        tools.extend(documents::tools());

        let mut index = HashMap::with_capacity(tools.len());
        for (i, tool) in tools.iter().enumerate() {
            let previous = index.insert(tool.name, i);
            assert!(previous.is_none(), "duplicate tool name: {}", tool.name);
        }

        Self { tools, index }
    }

    /// Tool definitions in `tools/list` wire format.
    pub fn definitions(&self) -> Value {
        let tools: Vec<Value> = self
            .tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                })
            })
            .collect();
        Value::Array(tools)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch one tool call.
    ///
    /// Unknown names fail before the credential check so discovery-mode
    /// clients get an accurate error, and a credential-less session gets
    /// a configuration error rather than a crash.
    pub async fn dispatch(
        &self,
        name: &str,
        args: Value,
        client: Option<&CompanyDataClient>,
    ) -> ToolResult {
        let def = self
            .index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let client = client.ok_or(ToolError::MissingCredential)?;
        (def.handler)(client, args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate raw arguments against a tool's parameter type.
pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(ToolError::InvalidArguments)
}

/// Wrap a successful result as MCP text content.
pub(crate) fn text_result(value: &impl Serialize) -> ToolResult {
    let text = serde_json::to_string_pretty(value).map_err(ToolError::Serialize)?;
    Ok(json!({
        "content": [{"type": "text", "text": text}]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builds_with_unique_names() {
        let registry = ToolRegistry::new();
        assert!(!registry.is_empty());
        assert_eq!(registry.index.len(), registry.len());
    }

    #[test]
    fn test_definitions_carry_schema_fields() {
        let registry = ToolRegistry::new();
        let defs = registry.definitions();
        let defs = defs.as_array().unwrap();
        assert_eq!(defs.len(), registry.len());
        for def in defs {
            assert!(def["name"].is_string());
            assert!(def["description"].is_string());
            assert_eq!(def["inputSchema"]["type"], "object");
            assert!(def["inputSchema"]["properties"].is_object());
        }
    }

    #[test]
    fn test_core_tools_registered() {
        let registry = ToolRegistry::new();
        for name in [
            "search_companies",
            "get_company_profile",
            "get_officers",
            "get_filing_history",
            "get_persons_with_significant_control",
            "get_charges",
            "search_officers",
            "get_registered_office_address",
            "advanced_company_search",
            "get_officer_appointments_list",
        ] {
            assert!(registry.index.contains_key(name), "missing tool: {}", name);
        }
    }

    #[test]
    fn test_psc_record_family_registered() {
        let registry = ToolRegistry::new();
        for name in [
            "get_psc_individual",
            "get_psc_individual_beneficial_owner",
            "get_psc_individual_verification",
            "get_psc_individual_full_record",
            "get_psc_corporate_entity",
            "get_psc_corporate_entity_beneficial_owner",
            "get_psc_legal_person",
            "get_psc_legal_person_beneficial_owner",
            "get_psc_statements_list",
            "get_psc_statement",
            "get_psc_super_secure",
            "get_psc_super_secure_beneficial_owner",
            "get_exemptions",
            "get_officer_appointment",
            "get_corporate_officer_disqualification",
            "get_natural_officer_disqualification",
            "alphabetical_search",
            "dissolved_search",
        ] {
            assert!(registry.index.contains_key(name), "missing tool: {}", name);
        }
    }

    #[tokio::test]
    async fn test_psc_item_tools_require_both_ids() {
        let registry = ToolRegistry::new();
        let client = CompanyDataClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            "http://127.0.0.1:9",
            "test-key",
        );
        // psc_id is required alongside company_number
        let result = registry
            .dispatch(
                "get_psc_individual",
                json!({"company_number": "00000006"}),
                Some(&client),
            )
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let registry = ToolRegistry::new();
        let result = registry
            .dispatch("definitely_not_a_tool", json!({"anything": true}), None)
            .await;
        assert!(matches!(result, Err(ToolError::UnknownTool(_))));
    }

    #[tokio::test]
    async fn test_dispatch_without_credential_is_config_error() {
        let registry = ToolRegistry::new();
        let result = registry
            .dispatch("search_companies", json!({"query": "Tesco"}), None)
            .await;
        assert!(matches!(result, Err(ToolError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_dispatch_invalid_arguments() {
        let registry = ToolRegistry::new();
        let client = CompanyDataClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            "http://127.0.0.1:9",
            "test-key",
        );
        // query is required for search_companies
        let result = registry
            .dispatch("search_companies", json!({}), Some(&client))
            .await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
