//! Document tools (filing images from the document API).

use serde_json::{json, Value};
use uk_company_types::api::DocumentParams;

use crate::client::CompanyDataClient;
use crate::tools::{parse_args, text_result, HandlerFuture, ToolDef};

fn document_id_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "document_id": {"type": "string", "description": "Document ID from a filing's links"}
        },
        "required": ["document_id"]
    })
}

pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "get_document_metadata",
            description: "Get metadata for a filed document (formats, pages, associated filing).",
            input_schema: document_id_schema(),
            handler: get_document_metadata,
        },
        ToolDef {
            name: "get_document_content",
            description: "Fetch a filed document. Content is binary PDF; reports the size retrieved.",
            input_schema: document_id_schema(),
            handler: get_document_content,
        },
    ]
}

fn get_document_metadata(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: DocumentParams = parse_args(args)?;
        let result = client.document_metadata(&params).await?;
        text_result(&result)
    })
}

fn get_document_content(client: &CompanyDataClient, args: Value) -> HandlerFuture<'_> {
    Box::pin(async move {
        let params: DocumentParams = parse_args(args)?;
        let bytes = client.document_content(&params).await?;
        // Binary payloads don't fit in text content; report the size like
        // the upstream tooling does.
        Ok(json!({
            "content": [{
                "type": "text",
                "text": format!("Document retrieved ({} bytes). Content is binary PDF data.", bytes.len())
            }]
        }))
    })
}
