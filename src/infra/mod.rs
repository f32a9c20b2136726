pub mod llm;
pub mod summary;
