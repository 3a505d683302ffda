//! Generate command - the full elicitation and generation pipeline.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::info;

use tfwise_generate::TfvarsGenerator;
use tfwise_intake::{enrich_answers, AnswerSet, ElicitationSession, QuestionEngine, StdinPrompter};
use tfwise_llm::LlmClient;
use tfwise_template::TemplateParser;

use super::{ModelArgs, TemplateArgs};
use crate::config;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Use rule-based synthesis instead of LLM generation for the final file
    #[arg(long)]
    pub rule_based: bool,

    /// Output file name, written inside the template directory
    #[arg(long, default_value = config::GENERATED_TFVARS_FILE)]
    pub output: String,
}

pub async fn execute(args: GenerateArgs) -> Result<()> {
    println!("Welcome to tfwise - AWS infrastructure configuration");
    println!("{}", "=".repeat(60));

    let template_dir = Path::new(&args.template.template_dir);
    let parser = TemplateParser::new(template_dir);
    let analysis = parser.analyze()?;

    if analysis.variables.is_empty() {
        anyhow::bail!(
            "no variables found in template directory '{}'",
            args.template.template_dir
        );
    }

    let client = LlmClient::from_env(&args.model.model, args.model.temperature)?;

    // Ensure service questions exist.
    let questions_path = template_dir.join(config::QUESTIONS_FILE);
    let engine = QuestionEngine::new(&client, &questions_path);
    let catalog = engine.ensure_questions(&analysis).await?;
    if catalog.is_empty() {
        return Err(tfwise_intake::IntakeError::NoQuestions.into());
    }

    // Collect answers interactively and derive extra configuration.
    let mut prompter = StdinPrompter;
    let mut session = ElicitationSession::new(&mut prompter);
    let records = session.collect_answers(&catalog)?;
    if records.is_empty() {
        anyhow::bail!("no answers collected");
    }

    let answers = enrich_answers(&records);
    print_summary(&records, &answers);

    // Produce the variables file.
    let output_path = template_dir.join(&args.output);
    let generator = TfvarsGenerator::new(&client, &output_path);
    let written = if args.rule_based {
        generator.generate_rule_based(&analysis, &answers)?
    } else {
        generator.generate_with_llm(&analysis, &answers).await?
    };

    info!("Generation complete: {:?}", written);
    println!("\nSuccess! Your configuration is ready: {}", written.display());
    println!("\nNext steps:");
    println!("  1. Review the generated variables file");
    println!("  2. Run 'terraform init' to initialize");
    println!("  3. Run 'terraform plan' to preview changes");
    println!("  4. Run 'terraform apply' to deploy");

    Ok(())
}

/// Print a summary of collected and derived configuration.
fn print_summary(records: &[tfwise_intake::AnswerRecord], answers: &AnswerSet) {
    let mut services: Vec<&str> = Vec::new();
    for record in records {
        if !services.contains(&record.service.as_str()) {
            services.push(&record.service);
        }
    }

    let inferred: Vec<(&str, &str)> = answers
        .iter()
        .filter(|(key, _)| {
            key.contains("suggested") || key.contains("enable") || key.contains("environment")
        })
        .collect();

    println!("\nCONFIGURATION SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Selected services: {}", services.join(", "));
    println!("Collected answers: {}", records.len());
    println!("Total configurations: {}", answers.len());

    if !inferred.is_empty() {
        println!("\nKey inferred configurations:");
        for (key, value) in inferred.iter().take(5) {
            println!("  {}: {}", key, value);
        }
    }
}
