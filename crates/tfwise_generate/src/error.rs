//! Error types for variables generation.

use thiserror::Error;

/// Result type alias for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that can occur while producing the variables file.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("LLM error: {0}")]
    Llm(#[from] tfwise_llm::LlmError),

    #[error("Template error: {0}")]
    Template(#[from] tfwise_template::TemplateError),

    #[error("Generated content failed validation: {0}")]
    InvalidOutput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
