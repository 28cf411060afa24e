//! Axum route handlers for the report API: session view, reset, and
//! narrative generation.

use axum::{extract::State, http::StatusCode, Json};

use crate::config::resolve_api_key;
use crate::errors::AppError;
use crate::report::narrative::{generate_narrative, validate_request, GenerateRequest, GenerateResponse};
use crate::session::SessionView;
use crate::state::AppState;

/// GET /api/v1/session
///
/// Returns what the form needs to render: readiness, the ordered criteria
/// list, and whether the server already holds an API key.
pub async fn handle_session(State(state): State<AppState>) -> Result<Json<SessionView>, AppError> {
    let view = state
        .session
        .view(state.config.groq_api_key.is_some())
        .map_err(AppError::Internal)?;
    Ok(Json(view))
}

/// POST /api/v1/session/reset
///
/// Clears the index and criteria list; the next upload re-ingests.
pub async fn handle_reset(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.session.clear().map_err(AppError::Internal)?;
    tracing::info!("Session reset");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/report/generate
///
/// Blocks until the LLM returns; the response carries the narrative text
/// verbatim. A failed call leaves the session in its prior state.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let api_key = resolve_api_key(&state.config, request.api_key.as_deref())?;
    validate_request(&request)?;

    let index = state
        .session
        .index()
        .map_err(AppError::Internal)?
        .ok_or_else(|| {
            AppError::SessionNotReady("Upload a rubric before generating a report".to_string())
        })?;

    tracing::info!(
        "Generating narrative for '{}' with {} scores",
        request.student_name.trim(),
        request.scores.len()
    );

    let narrative =
        generate_narrative(&request, &index, &state.embedder, &state.llm, &api_key).await?;

    Ok(Json(GenerateResponse { narrative }))
}
