//! Report module: criteria extraction and narrative generation, the two
//! LLM-backed halves of the report pipeline.

pub mod criteria;
pub mod handlers;
pub mod narrative;
pub mod prompts;
