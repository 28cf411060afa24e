mod config;
mod errors;
mod ingest;
mod llm_client;
mod report;
mod retrieval;
mod routes;
mod session;
mod state;
mod ui;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::retrieval::embedder::{Embedder, EMBEDDING_MODEL_NAME};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rapor API v{}", env!("CARGO_PKG_VERSION"));

    if config.groq_api_key.is_none() {
        warn!("GROQ_API_KEY not set; clients must supply a key with each request");
    }

    // Load the embedding model up front; the first run downloads weights.
    info!("Loading embedding model ({EMBEDDING_MODEL_NAME})...");
    let embedder = Arc::new(Embedder::new()?);
    info!(
        "Embedding model ready ({} dimensions)",
        embedder.dimensions()
    );

    let llm = LlmClient::new();
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        session: SessionStore::new(),
        embedder,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
