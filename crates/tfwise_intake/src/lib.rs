//! # tfwise_intake
//!
//! Question generation, interactive elicitation, and answer inference for
//! tfwise.
//!
//! The pipeline: a [`QuestionEngine`] turns a template analysis into a
//! persisted [`QuestionCatalog`] (create-if-absent), an
//! [`ElicitationSession`] collects raw per-service answers, and
//! [`enrich_answers`] folds keyword-derived configuration values into the
//! final [`AnswerSet`] handed to the generator.

pub mod answers;
pub mod catalog;
pub mod context;
pub mod elicit;
pub mod engine;
pub mod error;
pub mod infer;

pub use answers::{AnswerRecord, AnswerSet};
pub use catalog::{QuestionCatalog, ServiceQuestionSet};
pub use context::{available_services, build_context, build_question_prompt};
pub use elicit::{
    parse_selection, ElicitationSession, Prompter, SelectionOutcome, StdinPrompter, GENERAL_BUCKET,
};
pub use engine::{QuestionEngine, QUESTIONS_FILE};
pub use error::{IntakeError, IntakeResult};
pub use infer::{enrich_answers, infer, InferredAssignment};
