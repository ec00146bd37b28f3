//! Beneficial ownership tools (persons with significant control).
//!
//! Beyond the PSC list, the register exposes one sub-record endpoint per
//! PSC kind (individual, corporate entity, legal person, their
//! beneficial-owner variants, and the super-secure records), plus the
//! company's PSC statements. Each kind gets its own tool so an agent can
//! follow the `links` of a list entry directly.

use serde_json::{json, Value};
use uk_company_types::api::{
    PagedCompanyParams, PscItemParams, PscStatementParams, PscSuperSecureParams,
};

use crate::client::CompanyDataClient;
use crate::tools::{parse_args, text_result, HandlerFuture, ToolDef};

/// Input schema shared by the per-kind PSC record tools.
fn psc_item_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "company_number": {"type": "string", "description": "Company number"},
            "psc_id": {"type": "string", "description": "PSC ID from the PSC list's links"}
        },
        "required": ["company_number", "psc_id"]
    })
}

fn super_secure_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "company_number": {"type": "string", "description": "Company number"},
            "super_secure_id": {"type": "string", "description": "Super-secure PSC ID from the PSC list's links"}
        },
        "required": ["company_number", "super_secure_id"]
    })
}

pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "get_persons_with_significant_control",
            description: "Get persons with significant control (PSC) - beneficial owners.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "company_number": {"type": "string", "description": "Company number"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": ["company_number"]
            }),
            handler: get_persons_with_significant_control,
        },
        ToolDef {
            name: "get_psc_individual",
            description: "Get details of an individual person with significant control.",
            input_schema: psc_item_schema(),
            handler: get_psc_individual,
        },
        ToolDef {
            name: "get_psc_individual_beneficial_owner",
            description: "Get details of an individual beneficial owner.",
            input_schema: psc_item_schema(),
            handler: get_psc_individual_beneficial_owner,
        },
        ToolDef {
            name: "get_psc_individual_verification",
            description: "Get the identity verification state of an individual PSC.",
            input_schema: psc_item_schema(),
            handler: get_psc_individual_verification,
        },
        ToolDef {
            name: "get_psc_individual_full_record",
            description: "Get the full record of an individual PSC, including protected details.",
            input_schema: psc_item_schema(),
            handler: get_psc_individual_full_record,
        },
        ToolDef {
            name: "get_psc_corporate_entity",
            description: "Get details of a corporate entity with significant control.",
            input_schema: psc_item_schema(),
            handler: get_psc_corporate_entity,
        },
        ToolDef {
            name: "get_psc_corporate_entity_beneficial_owner",
            description: "Get details of a corporate entity beneficial owner.",
            input_schema: psc_item_schema(),
            handler: get_psc_corporate_entity_beneficial_owner,
        },
        ToolDef {
            name: "get_psc_legal_person",
            description: "Get details of a legal person with significant control.",
            input_schema: psc_item_schema(),
            handler: get_psc_legal_person,
        },
        ToolDef {
            name: "get_psc_legal_person_beneficial_owner",
            description: "Get details of a legal person beneficial owner.",
            input_schema: psc_item_schema(),
            handler: get_psc_legal_person_beneficial_owner,
        },
        ToolDef {
            name: "get_psc_statements_list",
            description: "List a company's PSC statements (e.g. 'no PSC identified').",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "company_number": {"type": "string", "description": "Company number"},
                    "items_per_page": {"type": "number"},
                    "start_index": {"type": "number"}
                },
                "required": ["company_number"]
            }),
            handler: get_psc_statements_list,
        },
        ToolDef {
            name: "get_psc_statement",
            description: "Get a single PSC statement.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "company_number": {"type": "string", "description": "Company number"},
                    "statement_id": {"type": "string", "description": "Statement ID from the statements list"}
                },
                "required": ["company_number", "statement_id"]
            }),
            handler: get_psc_statement,
        },
        ToolDef {
            name: "get_psc_super_secure",
            description: "Get a super-secure person with significant control record.",
            input_schema: super_secure_schema(),
            handler: get_psc_super_secure,
        },
        ToolDef {
            name: "get_psc_super_secure_beneficial_owner",
            description: "Get a super-secure beneficial owner record.",
            input_schema: super_secure_schema(),
            handler: get_psc_super_secure_beneficial_owner,
        },
    ]
}

fn get_persons_with_significant_control(
    client: &CompanyDataClient,
    args: Value,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PagedCompanyParams = parse_args(args)?;
        let result = client.persons_with_significant_control(&params).await?;
        text_result(&result)
    })
}

fn get_psc_individual(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscItemParams = parse_args(args)?;
        let result = client.psc_individual(&params).await?;
        text_result(&result)
    })
}

fn get_psc_individual_beneficial_owner(
    client: &CompanyDataClient,
    args: Value,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscItemParams = parse_args(args)?;
        let result = client.psc_individual_beneficial_owner(&params).await?;
        text_result(&result)
    })
}

fn get_psc_individual_verification(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscItemParams = parse_args(args)?;
        let result = client.psc_individual_verification(&params).await?;
        text_result(&result)
    })
}

fn get_psc_individual_full_record(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscItemParams = parse_args(args)?;
        let result = client.psc_individual_full_record(&params).await?;
        text_result(&result)
    })
}

fn get_psc_corporate_entity(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscItemParams = parse_args(args)?;
        let result = client.psc_corporate_entity(&params).await?;
        text_result(&result)
    })
}

fn get_psc_corporate_entity_beneficial_owner(
    client: &CompanyDataClient,
    args: Value,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscItemParams = parse_args(args)?;
        let result = client.psc_corporate_entity_beneficial_owner(&params).await?;
        text_result(&result)
    })
}

fn get_psc_legal_person(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscItemParams = parse_args(args)?;
        let result = client.psc_legal_person(&params).await?;
        text_result(&result)
    })
}

fn get_psc_legal_person_beneficial_owner(
    client: &CompanyDataClient,
    args: Value,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscItemParams = parse_args(args)?;
        let result = client.psc_legal_person_beneficial_owner(&params).await?;
        text_result(&result)
    })
}

fn get_psc_statements_list(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PagedCompanyParams = parse_args(args)?;
        let result = client.psc_statements(&params).await?;
        text_result(&result)
    })
}

fn get_psc_statement(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscStatementParams = parse_args(args)?;
        let result = client.psc_statement(&params).await?;
        text_result(&result)
    })
}

fn get_psc_super_secure(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscSuperSecureParams = parse_args(args)?;
        let result = client.psc_super_secure(&params).await?;
        text_result(&result)
    })
}

fn get_psc_super_secure_beneficial_owner(
    client: &CompanyDataClient,
    args: Value,
) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: PscSuperSecureParams = parse_args(args)?;
        let result = client.psc_super_secure_beneficial_owner(&params).await?;
        text_result(&result)
    })
}
