//! Integration tests for the synthesis and rendering pipeline.

use std::fs;

use tempfile::tempdir;

use tfwise_generate::{render_tfvars, synthesize, validate_tfvars, TfvarsGenerator};
use tfwise_intake::{enrich_answers, AnswerRecord};
use tfwise_llm::LlmClient;
use tfwise_template::TemplateParser;

const VARIABLES_TF: &str = r#"
variable "project_name" {
  description = "Name of the project"
  type        = string
  default     = "demo"
}

variable "create_vpc" {
  type    = bool
  default = false
}

variable "vpc_cidr" {
  description = "CIDR block for the VPC"
  type        = string
  default     = "10.0.0.0/16"
}

variable "create_rds" {
  type    = bool
  default = false
}

variable "db_engine" {
  description = "Database engine"
  type        = string
}
"#;

fn record(service: &str, ordinal: usize, text: &str) -> AnswerRecord {
    AnswerRecord {
        service: service.to_string(),
        ordinal,
        text: text.to_string(),
    }
}

/// Answers flow through inference into synthesis: toggles flip on, inferred
/// suggestions land on their mapped variables, defaults fill the rest.
#[test]
fn answers_to_assignments_end_to_end() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("variables.tf"), VARIABLES_TF).unwrap();
    let analysis = TemplateParser::new(temp.path()).analyze().unwrap();

    let records = vec![
        record("VPC", 1, "production, enterprise scale"),
        record("RDS", 1, "we run postgres"),
    ];
    let answers = enrich_answers(&records);
    let assignments = synthesize(&analysis, &answers);

    let by_name = |name: &str| {
        assignments
            .iter()
            .find(|a| a.name == name)
            .unwrap_or_else(|| panic!("missing assignment {}", name))
            .value
            .render()
    };

    assert_eq!(by_name("create_vpc"), "true");
    assert_eq!(by_name("create_rds"), "true");
    // vpc_suggested_cidr from inference maps onto vpc_cidr.
    assert_eq!(by_name("vpc_cidr"), "\"10.0.0.0/16\"");
    // rds_suggested_engine maps onto db_engine.
    assert_eq!(by_name("db_engine"), "\"postgres\"");
    assert_eq!(by_name("project_name"), "\"demo\"");
}

/// The rendered file groups assignments under category headers and passes
/// validation.
#[test]
fn rendered_file_is_valid_and_grouped() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("variables.tf"), VARIABLES_TF).unwrap();
    let analysis = TemplateParser::new(temp.path()).analyze().unwrap();

    let answers = enrich_answers(&[record("VPC", 1, "small startup setup")]);
    let assignments = synthesize(&analysis, &answers);
    let content = render_tfvars(&analysis, &assignments);

    assert!(validate_tfvars(&content));
    assert!(content.contains("# General Configuration"));
    assert!(content.contains("# VPC Configuration"));
    assert!(content.contains("# RDS Configuration"));
    assert!(content.contains("vpc_cidr = \"10.0.0.0/20\""));

    let general_pos = content.find("# General Configuration").unwrap();
    let vpc_pos = content.find("# VPC Configuration").unwrap();
    assert!(general_pos < vpc_pos);
}

/// The rule-based generator writes the rendered file to disk.
#[test]
fn generator_writes_rule_based_output() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("variables.tf"), VARIABLES_TF).unwrap();
    let analysis = TemplateParser::new(temp.path()).analyze().unwrap();

    let client = LlmClient::new("gpt-4.1", 0.3, "unused");
    let output = temp.path().join("out").join("generated_terraform.tfvars");
    let generator = TfvarsGenerator::new(&client, &output);

    let answers = enrich_answers(&[record("VPC", 1, "production")]);
    let path = generator.generate_rule_based(&analysis, &answers).unwrap();

    let content = fs::read_to_string(path).unwrap();
    assert!(content.starts_with("# Terraform Variables File"));
    assert!(content.contains("create_vpc = true"));
}
