//! Overlapping character-window chunker.
//!
//! Splits page text into fixed-size windows with a fixed overlap so each
//! retrieval unit stays within the embedding model's useful context while
//! neighbouring windows share enough text to avoid cutting a rubric row in
//! half. Window boundaries always fall on `char` boundaries.

use crate::retrieval::DocumentChunk;

/// Window size in characters.
pub const CHUNK_SIZE: usize = 1000;
/// Characters shared between consecutive windows.
pub const CHUNK_OVERLAP: usize = 220;

/// Splits extracted pages into [`DocumentChunk`]s with contiguous indices
/// starting at 0. Pages are 1-based.
pub fn chunk_pages(pages: &[String]) -> Vec<DocumentChunk> {
    let mut chunks = Vec::new();
    for (page_idx, page) in pages.iter().enumerate() {
        for window in split_text(page, CHUNK_SIZE, CHUNK_OVERLAP) {
            chunks.push(DocumentChunk {
                chunk_index: chunks.len(),
                page: page_idx + 1,
                text: window,
            });
        }
    }
    chunks
}

/// Splits `text` into overlapping windows of at most `size` chars, stepping
/// `size - overlap` chars each time. Empty or whitespace-only text yields
/// no windows; anything else yields at least one.
pub fn split_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    debug_assert!(overlap < size, "overlap must be smaller than window size");

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    // Byte offsets of every char boundary, plus the end of the string.
    let boundaries: Vec<usize> = trimmed
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(trimmed.len()))
        .collect();
    let char_count = boundaries.len() - 1;
    let step = size - overlap;

    let mut windows = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + size).min(char_count);
        windows.push(trimmed[boundaries[start]..boundaries[end]].to_string());
        if end == char_count {
            break;
        }
        start += step;
    }
    windows
}
