//! Questions command - ensure the question file exists.

use std::fs;
use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::info;

use tfwise_intake::QuestionEngine;
use tfwise_llm::LlmClient;
use tfwise_template::TemplateParser;

use super::{ModelArgs, TemplateArgs};
use crate::config;

#[derive(Args)]
pub struct QuestionsArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Regenerate even if a question file already exists
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: QuestionsArgs) -> Result<()> {
    let template_dir = Path::new(&args.template.template_dir);
    let questions_path = template_dir.join(config::QUESTIONS_FILE);

    if args.force && questions_path.exists() {
        info!("Removing existing questions file: {:?}", questions_path);
        fs::remove_file(&questions_path)?;
    }

    let parser = TemplateParser::new(template_dir);
    let analysis = parser.analyze()?;

    if analysis.variables.is_empty() {
        println!("No variables found in the Terraform template.");
        println!(
            "Ensure your template files are in the '{}' directory.",
            args.template.template_dir
        );
        return Ok(());
    }

    println!(
        "Found {} variables in {} resources",
        analysis.total_variables, analysis.total_resources
    );

    let client = LlmClient::from_env(&args.model.model, args.model.temperature)?;
    let engine = QuestionEngine::new(&client, &questions_path);
    let catalog = engine.ensure_questions(&analysis).await?;

    println!(
        "Question file ready: {} ({} services)",
        questions_path.display(),
        catalog.len()
    );
    for set in catalog.sets() {
        println!("  {}: {} questions", set.service, set.questions.len());
    }

    Ok(())
}
