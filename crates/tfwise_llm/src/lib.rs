//! # tfwise_llm
//!
//! LLM client for tfwise.
//!
//! One explicit handle covers both question generation and final
//! configuration generation. The provider (OpenAI or Anthropic) is selected
//! by classifying the model identifier; the caller constructs and owns the
//! client, passing it into whatever needs text generation.

pub mod client;
pub mod error;

pub use client::{LlmClient, Provider, TextGenerator, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
pub use error::{LlmError, LlmResult};
