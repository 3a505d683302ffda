//! CLI command definitions.

use clap::{Args, Parser, Subcommand};

use crate::config;

pub mod generate;
pub mod info;
pub mod questions;

/// tfwise - Terraform template analysis and requirements elicitation
#[derive(Parser)]
#[command(name = "tfwise")]
#[command(version, about = "tfwise - Terraform template analysis and requirements elicitation")]
#[command(long_about = r#"
tfwise analyzes a Terraform template directory, generates service-organized
requirement questions with an LLM, collects your answers interactively, and
produces a ready-to-use terraform.tfvars file.

WORKFLOWS:
  info       → Analyze the template and print a summary
  questions  → Ensure the question file exists (generate if missing)
  generate   → Full pipeline: questions, answers, tfvars generation

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Template error
  4 - Generation error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze the Terraform template and print a summary
    Info(info::InfoArgs),

    /// Ensure the question file exists, generating it if missing
    Questions(questions::QuestionsArgs),

    /// Run the full elicitation and generation pipeline
    Generate(generate::GenerateArgs),
}

/// Arguments shared by every subcommand.
#[derive(Args)]
pub struct TemplateArgs {
    /// Directory containing the Terraform template
    #[arg(long, env = "TFWISE_TEMPLATE_DIR", default_value = config::DEFAULT_TEMPLATE_DIR)]
    pub template_dir: String,
}

/// LLM settings shared by the generating subcommands.
#[derive(Args)]
pub struct ModelArgs {
    /// Model identifier; models starting with "claude" use Anthropic,
    /// everything else OpenAI
    #[arg(long, env = "TFWISE_MODEL", default_value = config::DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature
    #[arg(long, env = "TFWISE_TEMPERATURE", default_value_t = config::DEFAULT_TEMPERATURE)]
    pub temperature: f32,
}
