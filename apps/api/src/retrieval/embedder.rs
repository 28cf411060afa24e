//! Sentence-embedding wrapper around `fastembed`.
//!
//! Inference is CPU-bound, so every call goes through
//! `tokio::task::spawn_blocking` to keep the request thread free.

use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use thiserror::Error;

/// The sentence-embedding model used for all chunks and queries.
/// Intentionally hardcoded: swapping models invalidates every stored vector.
pub const EMBEDDING_MODEL_NAME: &str = "all-MiniLM-L6-v2";
pub const EMBEDDING_DIMENSIONS: usize = 384;
const EMBED_BATCH_SIZE: usize = 32;

#[derive(Debug, Error)]
pub enum EmbedderError {
    #[error("Failed to load embedding model: {0}")]
    Init(String),

    #[error("Embedding inference failed: {0}")]
    Inference(String),

    #[error("Embedding worker failed: {0}")]
    Worker(String),
}

/// Shared handle to the loaded embedding model.
pub struct Embedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl Embedder {
    /// Loads the model, downloading weights on first use. Blocking, so call it
    /// once at startup.
    pub fn new() -> Result<Self, EmbedderError> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false),
        )
        .map_err(|e| EmbedderError::Init(e.to_string()))?;
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }

    pub fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSIONS
    }

    /// Embeds a batch of chunk texts at ingestion time.
    pub async fn embed_passages(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let model = Arc::clone(&self.model);
        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|e| EmbedderError::Inference(format!("model lock poisoned: {e}")))?;
            model
                .embed(texts, Some(EMBED_BATCH_SIZE))
                .map_err(|e| EmbedderError::Inference(e.to_string()))
        })
        .await
        .map_err(|e| EmbedderError::Worker(e.to_string()))?
    }

    /// Embeds a single retrieval query.
    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>, EmbedderError> {
        let mut vectors = self.embed_passages(vec![query.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| EmbedderError::Inference("no embedding generated".to_string()))
    }
}
