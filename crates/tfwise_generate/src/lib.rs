//! # tfwise_generate
//!
//! Final variables-file production for tfwise.
//!
//! The synthesizer merges template defaults, service toggle flags, and
//! answer-derived values into typed assignments; the renderer serializes
//! them grouped by category. An LLM-backed path generates the file content
//! directly from the collected answers instead, validated before writing.

pub mod error;
pub mod generate;
pub mod render;
pub mod synth;

pub use error::{GenerateError, GenerateResult};
pub use generate::{
    build_generation_context, build_generation_prompt, clean_response, TfvarsGenerator,
    GENERATED_TFVARS_FILE,
};
pub use render::{render_tfvars, validate_tfvars};
pub use synth::{coerce_to, synthesize, FinalAssignment};
