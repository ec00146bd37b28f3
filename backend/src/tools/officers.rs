//! Officer tools.

use serde_json::{json, Value};
use uk_company_types::api::{
    OfficerAppointmentParams, OfficerAppointmentsParams, OfficerIdParams, PagedCompanyParams,
};

use crate::client::CompanyDataClient;
use crate::tools::{parse_args, text_result, HandlerFuture, ToolDef};

pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "get_officers",
            description: "Get list of company officers (directors, secretaries, LLP members).",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "company_number": {"type": "string", "description": "Company number"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": ["company_number"]
            }),
            handler: get_officers,
        },
        ToolDef {
            name: "get_officer_appointments_list",
            description: "Get all company appointments for a specific officer.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "officer_id": {"type": "string", "description": "Officer ID from search results"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": ["officer_id"]
            }),
            handler: get_officer_appointments_list,
        },
        ToolDef {
            name: "get_officer_appointment",
            description: "Get one officer's appointment to a specific company.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "company_number": {"type": "string", "description": "Company number"},
                    "appointment_id": {"type": "string", "description": "Appointment ID from the company's officer list"}
                },
                "required": ["company_number", "appointment_id"]
            }),
            handler: get_officer_appointment,
        },
        ToolDef {
            name: "get_corporate_officer_disqualification",
            description: "Get the disqualification record of a corporate officer.",
            input_schema: officer_id_schema(),
            handler: get_corporate_officer_disqualification,
        },
        ToolDef {
            name: "get_natural_officer_disqualification",
            description: "Get the disqualification record of a natural officer.",
            input_schema: officer_id_schema(),
            handler: get_natural_officer_disqualification,
        },
    ]
}

/// Shared schema for the disqualification lookups.
fn officer_id_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "officer_id": {"type": "string", "description": "Officer ID from search results"}
        },
        "required": ["officer_id"]
    })
}

fn get_officers(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PagedCompanyParams = parse_args(args)?;
        let result = client.officers(&params).await?;
        text_result(&result)
    })
}

fn get_officer_appointments_list(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: OfficerAppointmentsParams = parse_args(args)?;
        let result = client.officer_appointments(&params).await?;
        text_result(&result)
    })
}

fn get_officer_appointment(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: OfficerAppointmentParams = parse_args(args)?;
        let result = client.officer_appointment(&params).await?;
        text_result(&result)
    })
}

fn get_corporate_officer_disqualification(
    client: &CompanyDataClient,
    args: Value,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: OfficerIdParams = parse_args(args)?;
        let result = client.corporate_officer_disqualification(&params).await?;
        text_result(&result)
    })
}

fn get_natural_officer_disqualification(
    client: &CompanyDataClient,
    args: Value,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: OfficerIdParams = parse_args(args)?;
        let result = client.natural_officer_disqualification(&params).await?;
        text_result(&result)
    })
}
