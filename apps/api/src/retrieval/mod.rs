//! In-memory similarity search over rubric chunks.
//!
//! The index is brute-force cosine similarity over all stored vectors;
//! a rubric PDF yields a few dozen chunks at most, so there is no need
//! for an ANN structure. The index is immutable after construction.

pub mod embedder;

use anyhow::{bail, Result};

use crate::retrieval::embedder::Embedder;

/// Number of chunks returned per retrieval query.
pub const DEFAULT_TOP_K: usize = 4;

/// One bounded text window extracted from the rubric.
#[derive(Debug, Clone)]
pub struct DocumentChunk {
    /// Position within the document, contiguous from 0.
    pub chunk_index: usize,
    /// 1-based source page.
    pub page: usize,
    pub text: String,
}

/// Similarity index over [`DocumentChunk`]s. Built once per uploaded file;
/// no mutation after creation.
pub struct VectorIndex {
    chunks: Vec<DocumentChunk>,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    pub fn new(chunks: Vec<DocumentChunk>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != vectors.len() {
            bail!(
                "chunk/vector count mismatch: {} chunks, {} vectors",
                chunks.len(),
                vectors.len()
            );
        }
        Ok(Self { chunks, vectors })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.chunks.iter().map(|c| c.page).max().unwrap_or(0)
    }

    /// Returns the `k` chunks most similar to the query vector,
    /// best match first.
    pub fn top_k(&self, query: &[f32], k: usize) -> Vec<&DocumentChunk> {
        let mut scored: Vec<(f32, &DocumentChunk)> = self
            .vectors
            .iter()
            .zip(self.chunks.iter())
            .map(|(v, c)| (cosine_sim(query, v), c))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored.into_iter().map(|(_, c)| c).collect()
    }
}

fn cosine_sim(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a < f32::EPSILON || mag_b < f32::EPSILON {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

/// Top-k similarity lookup over a [`VectorIndex`], embedding the query text
/// on the way in.
pub struct Retriever<'a> {
    index: &'a VectorIndex,
    embedder: &'a Embedder,
    k: usize,
}

impl<'a> Retriever<'a> {
    pub fn new(index: &'a VectorIndex, embedder: &'a Embedder) -> Self {
        Self {
            index,
            embedder,
            k: DEFAULT_TOP_K,
        }
    }

    pub async fn retrieve(&self, query: &str) -> Result<Vec<&'a DocumentChunk>> {
        let query_vec = self.embedder.embed_query(query).await?;
        Ok(self.index.top_k(&query_vec, self.k))
    }

    /// Retrieves and concatenates chunk texts into one context block.
    pub async fn retrieve_context(&self, query: &str) -> Result<String> {
        let chunks = self.retrieve(query).await?;
        Ok(format_context(&chunks))
    }
}

/// Joins chunk texts with blank lines, in retrieval order.
pub fn format_context(chunks: &[&DocumentChunk]) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(i: usize, text: &str) -> DocumentChunk {
        DocumentChunk {
            chunk_index: i,
            page: 1,
            text: text.to_string(),
        }
    }

    fn index_of(vectors: Vec<Vec<f32>>) -> VectorIndex {
        let chunks = (0..vectors.len()).map(|i| chunk(i, &format!("chunk {i}"))).collect();
        VectorIndex::new(chunks, vectors).unwrap()
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let sim = cosine_sim(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let sim = cosine_sim(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_mismatched_lengths_is_zero() {
        assert_eq!(cosine_sim(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_top_k_orders_by_similarity() {
        let index = index_of(vec![
            vec![0.0, 1.0], // orthogonal to query
            vec![1.0, 0.0], // identical to query
            vec![1.0, 1.0], // in between
        ]);
        let hits = index.top_k(&[1.0, 0.0], 3);
        assert_eq!(hits[0].chunk_index, 1);
        assert_eq!(hits[1].chunk_index, 2);
        assert_eq!(hits[2].chunk_index, 0);
    }

    #[test]
    fn test_top_k_truncates() {
        let index = index_of(vec![vec![1.0, 0.0], vec![0.9, 0.1], vec![0.0, 1.0]]);
        let hits = index.top_k(&[1.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_top_k_on_empty_index() {
        let index = VectorIndex::new(Vec::new(), Vec::new()).unwrap();
        assert!(index.top_k(&[1.0, 0.0], 4).is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_new_rejects_count_mismatch() {
        let result = VectorIndex::new(vec![chunk(0, "a")], Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_page_count_takes_max() {
        let chunks = vec![
            DocumentChunk { chunk_index: 0, page: 1, text: "a".into() },
            DocumentChunk { chunk_index: 1, page: 3, text: "b".into() },
        ];
        let index = VectorIndex::new(chunks, vec![vec![1.0], vec![0.5]]).unwrap();
        assert_eq!(index.page_count(), 3);
    }

    #[test]
    fn test_format_context_joins_with_blank_lines() {
        let a = chunk(0, "first");
        let b = chunk(1, "second");
        assert_eq!(format_context(&[&a, &b]), "first\n\nsecond");
    }
}
