//! Company information tools.

use serde_json::{json, Value};
use uk_company_types::api::CompanyNumberParams;

use crate::client::CompanyDataClient;
use crate::tools::{parse_args, text_result, HandlerFuture, ToolDef};

/// Shared schema for tools taking just a company number.
fn company_number_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "company_number": {"type": "string", "description": "8-character company number"}
        },
        "required": ["company_number"]
    })
}

pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "get_company_profile",
            description: "Get detailed company profile including status, SIC codes, accounts dates.",
            input_schema: company_number_schema(),
            handler: get_company_profile,
        },
        ToolDef {
            name: "get_registered_office_address",
            description: "Get the registered office address of a company.",
            input_schema: company_number_schema(),
            handler: get_registered_office_address,
        },
        ToolDef {
            name: "get_registers",
            description: "Get where a company's statutory registers are held.",
            input_schema: company_number_schema(),
            handler: get_registers,
        },
        ToolDef {
            name: "get_insolvency",
            description: "Get insolvency case information for a company.",
            input_schema: company_number_schema(),
            handler: get_insolvency,
        },
        ToolDef {
            name: "get_uk_establishments",
            description: "Get UK establishments of an overseas company.",
            input_schema: company_number_schema(),
            handler: get_uk_establishments,
        },
        ToolDef {
            name: "get_exemptions",
            description: "Get a company's exemptions from PSC reporting.",
            input_schema: company_number_schema(),
            handler: get_exemptions,
        },
    ]
}

fn get_company_profile(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: CompanyNumberParams = parse_args(args)?;
        let result = client.company_profile(&params).await?;
        text_result(&result)
    })
}

fn get_registered_office_address(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: CompanyNumberParams = parse_args(args)?;
        let result = client.registered_office_address(&params).await?;
        text_result(&result)
    })
}

fn get_registers(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: CompanyNumberParams = parse_args(args)?;
        let result = client.registers(&params).await?;
        text_result(&result)
    })
}

fn get_insolvency(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: CompanyNumberParams = parse_args(args)?;
        let result = client.insolvency(&params).await?;
        text_result(&result)
    })
}

fn get_uk_establishments(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: CompanyNumberParams = parse_args(args)?;
        let result = client.uk_establishments(&params).await?;
        text_result(&result)
    })
}

fn get_exemptions(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: CompanyNumberParams = parse_args(args)?;
        let result = client.exemptions(&params).await?;
        text_result(&result)
    })
}
