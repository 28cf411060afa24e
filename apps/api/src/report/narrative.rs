//! Narrative Generator: turns scores plus rubric context into the final
//! report narrative.
//!
//! Flow: validate → format score summary → build student query →
//! retrieve top-k rubric chunks → fill narrative prompt → one LLM call.
//! The LLM's text is returned verbatim: no post-processing, validation,
//! or length control.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::report::prompts::{NARRATIVE_PROMPT_TEMPLATE, NARRATIVE_SYSTEM};
use crate::retrieval::{embedder::Embedder, Retriever, VectorIndex};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 4;

/// One scored criterion, in form order. Scores arrive as an ordered list
/// rather than a map because labels may repeat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub criterion: String,
    pub value: u8,
}

/// Request body for narrative generation.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub student_name: String,
    #[serde(default)]
    pub program: String,
    pub scores: Vec<ScoreEntry>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub narrative: String,
}

/// Rejects requests that must never reach the LLM: an empty student name,
/// no scores at all, or a score outside 1..=4.
pub fn validate_request(request: &GenerateRequest) -> Result<(), AppError> {
    if request.student_name.trim().is_empty() {
        return Err(AppError::Validation(
            "student_name cannot be empty".to_string(),
        ));
    }
    if request.scores.is_empty() {
        return Err(AppError::Validation(
            "at least one score is required".to_string(),
        ));
    }
    for entry in &request.scores {
        if !(MIN_SCORE..=MAX_SCORE).contains(&entry.value) {
            return Err(AppError::Validation(format!(
                "score for '{}' must be between {MIN_SCORE} and {MAX_SCORE}, got {}",
                entry.criterion, entry.value
            )));
        }
    }
    Ok(())
}

/// Flattens the score list into a `label: value` summary, in form order.
pub fn format_score_summary(scores: &[ScoreEntry]) -> String {
    scores
        .iter()
        .map(|s| format!("{}: {}", s.criterion, s.value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Assembles the student data block sent both as the retrieval query and
/// as the `{input}` section of the narrative prompt. Deterministic for a
/// fixed request.
pub fn build_student_query(request: &GenerateRequest) -> String {
    format!(
        "Nama Siswa: {}\nKelas: {}\n\nDetail Skor Per Aspek:\n{}\n\nCatatan Tambahan Guru:\n{}",
        request.student_name.trim(),
        request.program.trim(),
        format_score_summary(&request.scores),
        request.notes.trim()
    )
}

/// Fills the narrative prompt with retrieved rubric context and the
/// student data block.
pub fn build_narrative_prompt(context: &str, student_query: &str) -> String {
    NARRATIVE_PROMPT_TEMPLATE
        .replace("{context}", context)
        .replace("{input}", student_query)
}

/// Runs the narrative pipeline. The caller has already validated the
/// request and resolved the API key.
pub async fn generate_narrative(
    request: &GenerateRequest,
    index: &VectorIndex,
    embedder: &Embedder,
    llm: &LlmClient,
    api_key: &str,
) -> Result<String, AppError> {
    let student_query = build_student_query(request);

    let retriever = Retriever::new(index, embedder);
    let context = retriever
        .retrieve_context(&student_query)
        .await
        .map_err(AppError::Internal)?;

    let prompt = build_narrative_prompt(&context, &student_query);
    llm.call(api_key, NARRATIVE_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Narrative generation failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerateRequest {
        GenerateRequest {
            student_name: "Audy".to_string(),
            program: "Code & Explore Modul 1".to_string(),
            scores: vec![
                ScoreEntry {
                    criterion: "Kehadiran".to_string(),
                    value: 4,
                },
                ScoreEntry {
                    criterion: "Keterlibatan".to_string(),
                    value: 2,
                },
            ],
            notes: "Sering terlambat tapi sangat kreatif".to_string(),
            api_key: None,
        }
    }

    #[test]
    fn test_score_summary_exact_format() {
        let summary = format_score_summary(&request().scores);
        assert_eq!(summary, "Kehadiran: 4, Keterlibatan: 2");
    }

    #[test]
    fn test_student_query_is_deterministic_and_exact() {
        let query = build_student_query(&request());
        assert_eq!(
            query,
            "Nama Siswa: Audy\nKelas: Code & Explore Modul 1\n\n\
             Detail Skor Per Aspek:\nKehadiran: 4, Keterlibatan: 2\n\n\
             Catatan Tambahan Guru:\nSering terlambat tapi sangat kreatif"
        );
        assert_eq!(query, build_student_query(&request()));
    }

    #[test]
    fn test_prompt_contains_student_name_and_context() {
        let student_query = build_student_query(&request());
        let prompt = build_narrative_prompt("Rubrik: Kehadiran skor 4 berarti ...", &student_query);
        assert!(prompt.contains("Audy"));
        assert!(prompt.contains("Rubrik: Kehadiran skor 4 berarti ..."));
        assert!(!prompt.contains("{context}"));
        assert!(!prompt.contains("{input}"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut req = request();
        req.student_name = "   ".to_string();
        assert!(matches!(
            validate_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_scores_are_rejected() {
        let mut req = request();
        req.scores.clear();
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_score_out_of_range_is_rejected() {
        for bad in [0u8, 5] {
            let mut req = request();
            req.scores[0].value = bad;
            assert!(validate_request(&req).is_err(), "score {bad} must be rejected");
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn test_generate_request_deserialization_defaults() {
        let json = serde_json::json!({
            "student_name": "Audy",
            "scores": [{"criterion": "Kehadiran", "value": 3}]
        });
        let req: GenerateRequest = serde_json::from_value(json).unwrap();
        assert_eq!(req.program, "");
        assert_eq!(req.notes, "");
        assert!(req.api_key.is_none());
    }
}
