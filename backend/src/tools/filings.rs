//! Filing history tools.

use serde_json::{json, Value};
use uk_company_types::api::{FilingHistoryItemParams, FilingHistoryParams};

use crate::client::CompanyDataClient;
use crate::tools::{parse_args, text_result, HandlerFuture, ToolDef};

pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "get_filing_history",
            description: "Get company filing history (accounts, returns, resolutions).",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "company_number": {"type": "string", "description": "Company number"},
                    "category": {"type": "string", "description": "Filing category filter"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": ["company_number"]
            }),
            handler: get_filing_history,
        },
        ToolDef {
            name: "get_filing_history_item",
            description: "Get a single filing history transaction for a company.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "company_number": {"type": "string", "description": "Company number"},
                    "transaction_id": {"type": "string", "description": "Transaction ID from the filing history list"}
                },
                "required": ["company_number", "transaction_id"]
            }),
            handler: get_filing_history_item,
        },
    ]
}

fn get_filing_history(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: FilingHistoryParams = parse_args(args)?;
        let result = client.filing_history(&params).await?;
        text_result(&result)
    })
}

fn get_filing_history_item(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: FilingHistoryItemParams = parse_args(args)?;
        let result = client.filing_history_item(&params).await?;
        text_result(&result)
    })
}
