//! PDF text extraction.
//!
//! Uploaded bytes are written to a scoped temporary file which is removed
//! on every exit path when the `NamedTempFile` drops, including extraction
//! failures.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::ingest::IngestError;

/// Extracts per-page text from raw PDF bytes. Pages are split on the form
/// feeds `pdf-extract` emits between pages; a document without form feeds
/// is treated as a single page.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, IngestError> {
    let mut temp = NamedTempFile::new()?;
    temp.write_all(bytes)?;
    temp.flush()?;

    let text =
        pdf_extract::extract_text(temp.path()).map_err(|e| IngestError::Pdf(e.to_string()))?;

    let pages = split_form_feeds(&text);
    if pages.is_empty() {
        return Err(IngestError::EmptyDocument);
    }
    Ok(pages)
}

fn split_form_feeds(text: &str) -> Vec<String> {
    text.split('\u{c}')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}
