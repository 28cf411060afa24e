//! Document Ingestor: PDF bytes to a populated [`VectorIndex`].
//!
//! Flow: scoped temp file → per-page text → overlapping windows →
//! per-chunk embeddings → in-memory cosine index. There is no
//! partial-ingestion recovery: any failure discards the whole attempt and
//! the caller leaves the session untouched.

pub mod extract;
pub mod handlers;
pub mod splitter;

use thiserror::Error;
use tracing::info;

use crate::retrieval::{embedder::Embedder, VectorIndex};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Temp file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("No extractable text in document")]
    EmptyDocument,

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Index build failed: {0}")]
    Index(String),
}

/// Runs the full ingestion pipeline on an uploaded rubric.
pub async fn ingest_rubric(bytes: &[u8], embedder: &Embedder) -> Result<VectorIndex, IngestError> {
    let pages = extract::extract_pages(bytes)?;
    let chunks = splitter::chunk_pages(&pages);
    if chunks.is_empty() {
        return Err(IngestError::EmptyDocument);
    }

    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let vectors = embedder
        .embed_passages(texts)
        .await
        .map_err(|e| IngestError::Embedding(e.to_string()))?;

    let index =
        VectorIndex::new(chunks, vectors).map_err(|e| IngestError::Index(e.to_string()))?;

    info!(
        "Ingested rubric: {} pages, {} chunks",
        pages.len(),
        index.len()
    );
    Ok(index)
}
