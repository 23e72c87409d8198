//! Upload-and-analyze endpoint.
//!
//! Accepts a multipart form with a `file` part (the VCF upload) and a `drug`
//! field (comma-separated names). Validates extension, size and format
//! header, then hands off to the pipeline.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::info;

use pgxrisk_pipeline::run_analysis;
use pgxrisk_vcf::{decode_lossy, has_supported_header};

use crate::state::SharedState;

pub async fn analyze(State(state): State<SharedState>, mut multipart: Multipart) -> Response {
    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut drug_spec: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return bad_request("Malformed multipart request."),
        };

        match field.name() {
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                match field.bytes().await {
                    Ok(bytes) => file_bytes = Some(bytes.to_vec()),
                    Err(_) => return bad_request("Failed to read uploaded file."),
                }
            }
            Some("drug") => match field.text().await {
                Ok(text) => drug_spec = Some(text),
                Err(_) => return bad_request("Failed to read drug field."),
            },
            _ => {}
        }
    }

    let Some(bytes) = file_bytes else {
        return bad_request("Missing file upload.");
    };

    if !file_name.as_deref().is_some_and(|name| name.ends_with(".vcf")) {
        return bad_request("Invalid file format. Please upload a .vcf file.");
    }

    if bytes.len() > state.max_upload_bytes {
        return bad_request("File exceeds 5MB size limit.");
    }

    let text = decode_lossy(&bytes);

    if !has_supported_header(&text) {
        return bad_request("Invalid VCF file structure. Must be VCF v4.2.");
    }

    let drugs = parse_drug_list(drug_spec.as_deref().unwrap_or(""));
    if drugs.is_empty() {
        return bad_request("No drug specified.");
    }

    info!(file = file_name.as_deref().unwrap_or("?"), drugs = drugs.len(), "analysis request");

    let results = run_analysis(state.backend.as_ref(), &text, &drugs).await;

    Json(json!({ "results": results })).into_response()
}

/// Split the comma-separated drug field into an ordered list of non-empty
/// trimmed names.
pub fn parse_drug_list(spec: &str) -> Vec<String> {
    spec.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
