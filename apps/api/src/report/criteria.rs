//! Criteria Extractor: asks the LLM to enumerate the evaluation-aspect
//! titles present in the rubric.
//!
//! The returned labels are not validated against the document and are not
//! deduplicated beyond the prompt's own instruction; the form keys its
//! controls by position, so repeated labels cannot collide.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::report::prompts::{CRITERIA_PROMPT_TEMPLATE, CRITERIA_QUERY, CRITERIA_SYSTEM};
use crate::retrieval::{embedder::Embedder, Retriever, VectorIndex};

/// One retrieval plus one LLM completion over the freshly built index,
/// parsed into an ordered list of criterion labels.
pub async fn extract_criteria(
    index: &VectorIndex,
    embedder: &Embedder,
    llm: &LlmClient,
    api_key: &str,
) -> Result<Vec<String>, AppError> {
    let retriever = Retriever::new(index, embedder);
    let context = retriever
        .retrieve_context(CRITERIA_QUERY)
        .await
        .map_err(AppError::Internal)?;

    let prompt = CRITERIA_PROMPT_TEMPLATE.replace("{context}", &context);
    let raw = llm
        .call(api_key, CRITERIA_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Criteria extraction failed: {e}")))?;

    let criteria = parse_criteria_list(&raw);
    info!("Detected {} criteria", criteria.len());
    Ok(criteria)
}

/// Splits the LLM's comma-separated response into trimmed labels,
/// dropping empty segments.
pub fn parse_criteria_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let criteria = parse_criteria_list("Kehadiran , Keterlibatan,  Kreativitas ");
        assert_eq!(criteria, vec!["Kehadiran", "Keterlibatan", "Kreativitas"]);
    }

    #[test]
    fn test_parse_drops_empty_segments() {
        let criteria = parse_criteria_list("Kehadiran,, Keterlibatan,");
        assert_eq!(criteria, vec!["Kehadiran", "Keterlibatan"]);
    }

    #[test]
    fn test_parse_handles_trailing_newline() {
        let criteria = parse_criteria_list("Kehadiran, Keterlibatan\n");
        assert_eq!(criteria, vec!["Kehadiran", "Keterlibatan"]);
    }

    #[test]
    fn test_parse_keeps_order_and_duplicates() {
        // The model is instructed not to repeat labels but sometimes does;
        // duplicates pass through untouched.
        let criteria = parse_criteria_list("Kehadiran, Kreativitas, Kehadiran");
        assert_eq!(criteria, vec!["Kehadiran", "Kreativitas", "Kehadiran"]);
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(parse_criteria_list("").is_empty());
        assert!(parse_criteria_list(" , , ").is_empty());
    }

    #[test]
    fn test_criteria_prompt_has_context_placeholder() {
        assert!(CRITERIA_PROMPT_TEMPLATE.contains("{context}"));
    }
}
