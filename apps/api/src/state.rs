use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::retrieval::embedder::Embedder;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single session's rubric index and criteria list.
    pub session: SessionStore,
    pub embedder: Arc<Embedder>,
    pub llm: LlmClient,
    pub config: Config,
}
