use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing API key")]
    MissingApiKey,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Session not ready: {0}")]
    SessionNotReady(String),

    #[error("Ingestion error: {0}")]
    Ingest(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingApiKey => (
                StatusCode::BAD_REQUEST,
                "MISSING_API_KEY",
                "Provide a Groq API key to continue".to_string(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::SessionNotReady(msg) => {
                (StatusCode::CONFLICT, "SESSION_NOT_READY", msg.clone())
            }
            AppError::Ingest(msg) => {
                tracing::error!("Ingestion error: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INGEST_ERROR",
                    "Could not process the uploaded rubric. Check that the file is a readable PDF."
                        .to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_error_hides_detail_from_user() {
        let response = AppError::Ingest("lopdf parse failure at byte 12".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_missing_api_key_is_bad_request() {
        let response = AppError::MissingApiKey.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_session_not_ready_is_conflict() {
        let response = AppError::SessionNotReady("no rubric loaded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
