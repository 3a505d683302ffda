//! Error types for the intake pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for intake operations.
pub type IntakeResult<T> = Result<T, IntakeError>;

/// Errors that can occur during question generation and elicitation.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Questions file not found: {0}")]
    QuestionsNotFound(PathBuf),

    #[error("No service questions available")]
    NoQuestions,

    #[error("LLM error: {0}")]
    Llm(#[from] tfwise_llm::LlmError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
