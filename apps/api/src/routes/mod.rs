pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ingest::handlers as ingest_handlers;
use crate::report::handlers as report_handlers;
use crate::state::AppState;
use crate::ui;

/// Rubric PDFs are small; anything past this is not a rubric.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/session", get(report_handlers::handle_session))
        .route("/api/v1/session/reset", post(report_handlers::handle_reset))
        .route("/api/v1/rubric/upload", post(ingest_handlers::handle_upload))
        .route(
            "/api/v1/report/generate",
            post(report_handlers::handle_generate),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
