//! Variables-file generation: the LLM-backed path and the rule-based path.
//!
//! Both paths end in the same place, a validated terraform.tfvars written
//! to the configured output path. The LLM path is a hard-failure operation:
//! if the collaborator call or validation fails, nothing is written.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::info;

use tfwise_intake::AnswerSet;
use tfwise_llm::TextGenerator;
use tfwise_template::TemplateAnalysis;

use crate::error::{GenerateError, GenerateResult};
use crate::render::{render_tfvars, validate_tfvars};
use crate::synth::synthesize;

/// Default output file name.
pub const GENERATED_TFVARS_FILE: &str = "generated_terraform.tfvars";

/// Generator for the final variables file.
pub struct TfvarsGenerator<'a> {
    client: &'a dyn TextGenerator,
    output_path: PathBuf,
}

impl<'a> TfvarsGenerator<'a> {
    pub fn new(client: &'a dyn TextGenerator, output_path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Generate the variables file with the LLM.
    ///
    /// The response is cleaned best-effort (markdown fences, leading prose)
    /// and validated before anything touches the filesystem.
    pub async fn generate_with_llm(
        &self,
        analysis: &TemplateAnalysis,
        answers: &AnswerSet,
    ) -> GenerateResult<PathBuf> {
        info!("Generating Terraform variables from collected answers");

        let prompt = build_generation_prompt(analysis, answers);
        let response = self.client.complete(&prompt).await?;

        let content = clean_response(&response);
        if !validate_tfvars(&content) {
            return Err(GenerateError::InvalidOutput(
                "no variable assignments found in generated content".to_string(),
            ));
        }

        self.write(&content)?;
        Ok(self.output_path.clone())
    }

    /// Generate the variables file from the rule-based synthesizer alone.
    pub fn generate_rule_based(
        &self,
        analysis: &TemplateAnalysis,
        answers: &AnswerSet,
    ) -> GenerateResult<PathBuf> {
        info!("Generating Terraform variables with rule-based synthesis");

        let assignments = synthesize(analysis, answers);
        let content = render_tfvars(analysis, &assignments);
        if !validate_tfvars(&content) {
            return Err(GenerateError::InvalidOutput(
                "synthesis produced no assignments".to_string(),
            ));
        }

        self.write(&content)?;
        Ok(self.output_path.clone())
    }

    fn write(&self, content: &str) -> GenerateResult<()> {
        if let Some(parent) = self.output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.output_path, content)?;
        info!("Terraform variables written to {:?}", self.output_path);
        Ok(())
    }
}

/// Summarize the template for the generation prompt: per-category variables
/// with type, description, and default, plus the service toggles.
pub fn build_generation_context(analysis: &TemplateAnalysis) -> String {
    let mut parts = vec!["AVAILABLE TERRAFORM VARIABLES:".to_string()];

    for category in &analysis.categories {
        parts.push(format!("\n{}:", category.name));
        for name in category.members.iter().take(10) {
            let Some(variable) = analysis.variable(name) else {
                continue;
            };
            parts.push(format!(
                "  - {} ({}): {}",
                variable.name, variable.type_expr, variable.description
            ));
            if let Some(default) = &variable.default {
                parts.push(format!("    Default: {}", default.render()));
            }
        }
    }

    if !analysis.toggle_groups.is_empty() {
        parts.push("\nSERVICE TOGGLES (create_* variables):".to_string());
        for group in &analysis.toggle_groups {
            parts.push(format!(
                "  - {}: Enable/disable {} resources",
                group.controlling_variable,
                group.service.to_uppercase()
            ));
        }
    }

    parts.join("\n")
}

/// Build the full generation prompt from the template context and the
/// collected answers.
pub fn build_generation_prompt(analysis: &TemplateAnalysis, answers: &AnswerSet) -> String {
    let context = build_generation_context(analysis);
    let answers_text: Vec<String> = answers
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect();

    format!(
        r#"As an AWS Deployment Engineer expert, generate a terraform.tfvars file based on the user's requirements and the available Terraform template.

TERRAFORM TEMPLATE CONTEXT:
{context}

USER ANSWERS:
{answers}

REQUIREMENTS:
1. Generate a complete terraform.tfvars file with appropriate values
2. Map user answers to the correct Terraform variable names
3. Use AWS best practices for naming, security, and configuration
4. Include comments explaining the purpose of each variable
5. Set appropriate default values where the user didn't specify
6. Ensure security best practices (strong passwords, encryption enabled, etc.)
7. Use proper Terraform syntax for different variable types (strings, booleans, lists, maps)
8. Consider the target environment (dev/staging/prod) when setting values

VARIABLE TYPES TO HANDLE:
- Strings: Use quotes
- Numbers: No quotes
- Booleans: true/false (no quotes)
- Lists: ["item1", "item2"]
- Maps: {{key1 = "value1", key2 = "value2"}}

OUTPUT FORMAT:
Generate only the terraform.tfvars file content with:
- Header comment explaining the file
- Well-organized sections by AWS service
- Inline comments for each variable
- Proper Terraform syntax

Generate the complete terraform.tfvars file now:"#,
        context = context,
        answers = answers_text.join("\n")
    )
}

/// Strip markdown fences and leading prose from a generator response.
///
/// Content starts at the first comment or assignment line; anything the
/// model said before that is dropped.
pub fn clean_response(response: &str) -> String {
    let without_fences = match Regex::new(r"```[\w]*\n?") {
        Ok(re) => re.replace_all(response, "").into_owned(),
        Err(_) => response.to_string(),
    };

    let mut in_content = false;
    let mut lines = Vec::new();
    for line in without_fences.lines() {
        if !in_content && (line.trim_start().starts_with('#') || line.contains('=')) {
            in_content = true;
        }
        if in_content {
            lines.push(line);
        }
    }

    lines.join("\n").trim().to_string()
}
