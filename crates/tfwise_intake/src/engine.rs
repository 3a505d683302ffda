//! Question protocol engine.
//!
//! Drives the external generator: builds the context prompt, parses the
//! response into a [`QuestionCatalog`], and persists it. Generation is
//! create-if-absent: once a catalog file exists it is reloaded as-is and
//! never regenerated unless the file is removed first.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use tfwise_llm::TextGenerator;
use tfwise_template::TemplateAnalysis;

use crate::catalog::QuestionCatalog;
use crate::context::build_question_prompt;
use crate::error::IntakeResult;

/// Default file name for the persisted question catalog.
pub const QUESTIONS_FILE: &str = "generated_questions.txt";

/// Engine for generating and persisting service questions.
pub struct QuestionEngine<'a> {
    client: &'a dyn TextGenerator,
    questions_path: PathBuf,
}

impl<'a> QuestionEngine<'a> {
    pub fn new(client: &'a dyn TextGenerator, questions_path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            questions_path: questions_path.into(),
        }
    }

    pub fn questions_path(&self) -> &Path {
        &self.questions_path
    }

    /// Return the persisted catalog if one exists, otherwise generate,
    /// persist, and return a fresh one.
    pub async fn ensure_questions(
        &self,
        analysis: &TemplateAnalysis,
    ) -> IntakeResult<QuestionCatalog> {
        if self.questions_path.exists() {
            info!("Questions file already exists: {:?}", self.questions_path);
            return QuestionCatalog::load(&self.questions_path);
        }
        self.generate(analysis).await
    }

    /// Generate a catalog from the analysis and persist it.
    ///
    /// A template with no variables produces an empty catalog and writes
    /// nothing. A generator failure aborts the operation; nothing is
    /// persisted in that case.
    pub async fn generate(&self, analysis: &TemplateAnalysis) -> IntakeResult<QuestionCatalog> {
        if analysis.variables.is_empty() {
            warn!("No variables found in template; skipping question generation");
            return Ok(QuestionCatalog::new());
        }

        info!(
            "Generating questions for {} variables across {} resources",
            analysis.total_variables, analysis.total_resources
        );

        let prompt = build_question_prompt(analysis);
        let response = self.client.complete(&prompt).await?;

        let catalog = QuestionCatalog::parse(&response);
        if catalog.is_empty() {
            warn!("Generator response contained no recognizable question blocks");
        }

        catalog.save(&self.questions_path)?;
        info!("Question catalog saved to {:?}", self.questions_path);
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceQuestionSet;
    use tfwise_llm::{LlmError, LlmResult};

    /// Generator replaying a fixed response, or failing when none is set.
    struct ScriptedGenerator {
        response: Option<&'static str>,
    }

    #[async_trait::async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn complete(&self, _prompt: &str) -> LlmResult<String> {
            match self.response {
                Some(text) => Ok(text.to_string()),
                None => Err(LlmError::Request("connection refused".to_string())),
            }
        }
    }

    fn one_variable_analysis() -> TemplateAnalysis {
        TemplateAnalysis {
            variables: vec![tfwise_template::Variable::new("vpc_cidr")],
            resources: Vec::new(),
            categories: Vec::new(),
            toggle_groups: Vec::new(),
            total_variables: 1,
            total_resources: 0,
        }
    }

    #[tokio::test]
    async fn existing_file_short_circuits_generation() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(QUESTIONS_FILE);

        let mut catalog = QuestionCatalog::new();
        catalog.push(ServiceQuestionSet {
            service: "VPC".to_string(),
            questions: vec!["Environment?".to_string()],
        });
        catalog.save(&path).unwrap();

        // A failing generator: never called because the file exists.
        let client = ScriptedGenerator { response: None };
        let engine = QuestionEngine::new(&client, &path);

        let loaded = engine.ensure_questions(&one_variable_analysis()).await.unwrap();
        assert_eq!(loaded, catalog);
    }

    #[tokio::test]
    async fn grammatical_response_is_parsed_and_persisted() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(QUESTIONS_FILE);

        let client = ScriptedGenerator {
            response: Some(
                "Service-name: VPC\nQuestions:\n- What environment is this for?\n",
            ),
        };
        let engine = QuestionEngine::new(&client, &path);

        let catalog = engine.ensure_questions(&one_variable_analysis()).await.unwrap();
        assert_eq!(catalog.services(), vec!["VPC"]);
        assert_eq!(
            catalog.get("VPC").unwrap().questions,
            vec!["What environment is this for?"]
        );

        // The persisted file reloads to the same catalog.
        assert!(path.exists());
        assert_eq!(QuestionCatalog::load(&path).unwrap(), catalog);
    }

    #[tokio::test]
    async fn generator_failure_persists_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(QUESTIONS_FILE);

        let client = ScriptedGenerator { response: None };
        let engine = QuestionEngine::new(&client, &path);

        let result = engine.ensure_questions(&one_variable_analysis()).await;
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn empty_template_yields_empty_catalog_without_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(QUESTIONS_FILE);

        let client = ScriptedGenerator { response: None };
        let engine = QuestionEngine::new(&client, &path);

        let analysis = TemplateAnalysis {
            variables: Vec::new(),
            resources: Vec::new(),
            categories: Vec::new(),
            toggle_groups: Vec::new(),
            total_variables: 0,
            total_resources: 0,
        };

        let catalog = engine.ensure_questions(&analysis).await.unwrap();
        assert!(catalog.is_empty());
        assert!(!path.exists());
    }
}
