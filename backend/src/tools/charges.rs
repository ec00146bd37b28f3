//! Charge tools (mortgages, debentures, security interests).

use serde_json::{json, Value};
use uk_company_types::api::{ChargeDetailsParams, PagedCompanyParams};

use crate::client::CompanyDataClient;
use crate::tools::{parse_args, text_result, HandlerFuture, ToolDef};

pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "get_charges",
            description: "Get company charges (mortgages, debentures, security interests).",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "company_number": {"type": "string", "description": "Company number"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": ["company_number"]
            }),
            handler: get_charges,
        },
        ToolDef {
            name: "get_charge_details",
            description: "Get the details of a single charge registered against a company.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "company_number": {"type": "string", "description": "Company number"},
                    "charge_id": {"type": "string", "description": "Charge ID from the charges list"}
                },
                "required": ["company_number", "charge_id"]
            }),
            handler: get_charge_details,
        },
    ]
}

fn get_charges(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PagedCompanyParams = parse_args(args)?;
        let result = client.charges(&params).await?;
        text_result(&result)
    })
}

fn get_charge_details(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: ChargeDetailsParams = parse_args(args)?;
        let result = client.charge_details(&params).await?;
        text_result(&result)
    })
}
