//! Axum route handler for rubric upload.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::config::resolve_api_key;
use crate::errors::AppError;
use crate::ingest::ingest_rubric;
use crate::report::criteria::extract_criteria;
use crate::state::AppState;

const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub criteria: Vec<String>,
    pub chunk_count: usize,
    pub page_count: usize,
}

/// POST /api/v1/rubric/upload
///
/// Multipart form: `file` (PDF only) plus optional `api_key`. Runs the
/// full ingestion pipeline and then criteria extraction. On ingestion
/// failure the session stays unset so the user can retry by re-uploading;
/// if only criteria extraction fails, the index is kept and the error is
/// surfaced; the user can reset and start over.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    if state.session.has_index().map_err(AppError::Internal)? {
        return Err(AppError::Conflict(
            "A rubric is already loaded. Reset the session before uploading a new one.".to_string(),
        ));
    }

    let mut file_bytes: Option<Vec<u8>> = None;
    let mut request_key: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                check_is_pdf(field.content_type(), field.file_name())?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file_bytes = Some(bytes.to_vec());
            }
            Some("api_key") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read api_key: {e}")))?;
                request_key = Some(value);
            }
            _ => {}
        }
    }

    let bytes = file_bytes
        .ok_or_else(|| AppError::Validation("Missing 'file' field in upload".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    // Blocks all downstream work, including ingestion, when no key exists.
    let api_key = resolve_api_key(&state.config, request_key.as_deref())?;

    info!("Ingesting uploaded rubric ({} bytes)", bytes.len());
    let index = ingest_rubric(&bytes, &state.embedder)
        .await
        .map_err(|e| AppError::Ingest(e.to_string()))?;

    let chunk_count = index.len();
    let page_count = index.page_count();

    let index = state.session.set_index(index).map_err(AppError::Internal)?;

    let criteria = extract_criteria(&index, &state.embedder, &state.llm, &api_key).await?;
    state
        .session
        .set_criteria(criteria.clone())
        .map_err(AppError::Internal)?;

    Ok(Json(UploadResponse {
        criteria,
        chunk_count,
        page_count,
    }))
}

/// Rejects anything that is not declared as a PDF, by MIME type when the
/// browser sends one, by file extension otherwise.
fn check_is_pdf(content_type: Option<&str>, file_name: Option<&str>) -> Result<(), AppError> {
    let mime_ok = content_type.map(|ct| ct == PDF_MIME);
    let name_ok = file_name.map(|n| n.to_ascii_lowercase().ends_with(".pdf"));
    match (mime_ok, name_ok) {
        (Some(true), _) | (None, Some(true)) => Ok(()),
        _ => Err(AppError::Validation(
            "Only PDF uploads are accepted".to_string(),
        )),
    }
}
