//! Search tools: free-text and filtered company/officer search.

use serde_json::{json, Value};
use uk_company_types::api::{AdvancedCompanySearchParams, SearchParams};

use crate::client::CompanyDataClient;
use crate::tools::{parse_args, text_result, HandlerFuture, ToolDef};

pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "search_companies",
            description:
                "Search for UK companies by name or number. Returns matching companies with basic info.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Company name or number to search"},
                    "items_per_page": {"type": "number", "description": "Results per page (1-100)"},
                    "start_index": {"type": "number", "description": "Pagination start index"}
                },
                "required": ["query"]
            }),
            handler: search_companies,
        },
        ToolDef {
            name: "search_officers",
            description: "Search for company officers by name across all UK companies.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Officer name to search"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": ["query"]
            }),
            handler: search_officers,
        },
        ToolDef {
            name: "search_all",
            description: "Search companies, officers and disqualified officers in a single query.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Search term"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": ["query"]
            }),
            handler: search_all,
        },
        ToolDef {
            name: "search_disqualified_officers",
            description: "Search for disqualified officers by name.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Officer name to search"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": ["query"]
            }),
            handler: search_disqualified_officers,
        },
        ToolDef {
            name: "advanced_company_search",
            description: "Advanced search with filters: status, type, location, dates, SIC codes.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "company_name": {"type": "string"},
                    "company_status": {"type": "string"},
                    "company_type": {"type": "string"},
                    "location": {"type": "string"},
                    "incorporated_from": {"type": "string", "description": "YYYY-MM-DD"},
                    "incorporated_to": {"type": "string", "description": "YYYY-MM-DD"},
                    "sic_codes": {"type": "string", "description": "Comma-separated SIC codes"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": []
            }),
            handler: advanced_company_search,
        },
        ToolDef {
            name: "alphabetical_search",
            description: "Search companies alphabetically by name.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Company name to search"},
                    "items_per_page": {"type": "number", "description": "Results per page"}
                },
                "required": ["query"]
            }),
            handler: alphabetical_search,
        },
        ToolDef {
            name: "dissolved_search",
            description: "Search dissolved companies by name.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Company name to search"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": ["query"]
            }),
            handler: dissolved_search,
        },
    ]
}

fn search_companies(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: SearchParams = parse_args(args)?;
        let result = client.search_companies(&params).await?;
        text_result(&result)
    })
}

fn search_officers(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: SearchParams = parse_args(args)?;
        let result = client.search_officers(&params).await?;
        text_result(&result)
    })
}

fn search_all(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: SearchParams = parse_args(args)?;
        let result = client.search_all(&params).await?;
        text_result(&result)
    })
}

fn search_disqualified_officers(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: SearchParams = parse_args(args)?;
        let result = client.search_disqualified_officers(&params).await?;
        text_result(&result)
    })
}

fn advanced_company_search(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: AdvancedCompanySearchParams = parse_args(args)?;
        let result = client.advanced_company_search(&params).await?;
        text_result(&result)
    })
}

fn alphabetical_search(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: SearchParams = parse_args(args)?;
        let result = client.alphabetical_company_search(&params).await?;
        text_result(&result)
    })
}

fn dissolved_search(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: SearchParams = parse_args(args)?;
        let result = client.dissolved_company_search(&params).await?;
        text_result(&result)
    })
}
