//! Prompt context construction for question generation.

use tfwise_template::TemplateAnalysis;

/// How many variable names to sample per category in the context.
const CATEGORY_SAMPLE: usize = 5;
/// How many required/boolean names to list before truncating.
const NAME_LIST_CAP: usize = 10;

/// Summarize the analysis for the generator prompt.
pub fn build_context(analysis: &TemplateAnalysis) -> String {
    let mut parts = Vec::new();

    parts.push(format!("VARIABLES FOUND: {}", analysis.total_variables));
    parts.push(format!("RESOURCES FOUND: {}", analysis.total_resources));

    if !analysis.categories.is_empty() {
        parts.push("\nVARIABLE CATEGORIES:".to_string());
        for category in &analysis.categories {
            let sample: Vec<&str> = category
                .members
                .iter()
                .take(CATEGORY_SAMPLE)
                .map(String::as_str)
                .collect();
            let suffix = if category.members.len() > CATEGORY_SAMPLE {
                "..."
            } else {
                ""
            };
            parts.push(format!("  {}: {}{}", category.name, sample.join(", "), suffix));
        }
    }

    if !analysis.toggle_groups.is_empty() {
        parts.push("\nCONDITIONAL SERVICES (can be enabled/disabled):".to_string());
        for group in &analysis.toggle_groups {
            parts.push(format!(
                "  {}: {} configuration variables",
                group.service.to_uppercase(),
                group.dependents.len()
            ));
        }
    }

    let required = analysis.required_variables();
    let booleans = analysis.boolean_variables();
    let sensitive = analysis.sensitive_variables();

    if !required.is_empty() {
        parts.push(format!(
            "\nREQUIRED VARIABLES: {}",
            required[..required.len().min(NAME_LIST_CAP)].join(", ")
        ));
    }
    if !booleans.is_empty() {
        parts.push(format!(
            "BOOLEAN FLAGS: {}",
            booleans[..booleans.len().min(NAME_LIST_CAP)].join(", ")
        ));
    }
    if !sensitive.is_empty() {
        parts.push(format!("SENSITIVE VARIABLES: {}", sensitive.join(", ")));
    }

    let services = analysis.service_tags();
    if !services.is_empty() {
        parts.push(format!("\nAWS SERVICES SUPPORTED: {}", services.join(", ")));
    }

    parts.join("\n")
}

/// Service tags the questions may be organized under: toggle tags, resource
/// tags, and the always-present GENERAL bucket, sorted.
pub fn available_services(analysis: &TemplateAnalysis) -> Vec<String> {
    let mut services: Vec<String> = analysis
        .toggle_groups
        .iter()
        .map(|group| group.service.to_uppercase())
        .chain(analysis.resources.iter().map(|r| r.service.clone()))
        .collect();
    services.push("GENERAL".to_string());
    services.sort();
    services.dedup();
    services
}

/// Build the full question-generation prompt, requesting the
/// `Service-name:`/`Questions:`/bullet response grammar.
pub fn build_question_prompt(analysis: &TemplateAnalysis) -> String {
    let context = build_context(analysis);
    let services = available_services(analysis).join(", ");

    format!(
        r#"As an AWS Deployment Engineer expert, analyze the following Terraform template and generate service-organized questions to collect user requirements.

TERRAFORM TEMPLATE ANALYSIS:
{context}

AVAILABLE AWS SERVICES: {services}

REQUIREMENTS:
1. Organize questions by AWS service (Service-name: SERVICE_NAME, Questions: [list of questions])
2. Generate essential questions for each service that can achieve 98% configuration accuracy
3. Ask minimal but comprehensive questions to infer maximum details
4. Include service dependencies (e.g., VPC needed for EC2, RDS)
5. Make questions smart to infer related configurations

QUESTION FORMAT FOR EACH SERVICE:
Service-name: [SERVICE_NAME]
Questions:
- [Essential question 1]
- [Essential question 2]
- [Essential question 3]

GUIDELINES:
- Keep questions minimal but comprehensive
- Ask about naming patterns to infer multiple resource names
- Include environment context questions (dev/staging/prod)
- Ask about size/capacity to infer instance types and storage
- Include security and compliance essentials
- For VPC: Ask about network architecture and connectivity needs
- For EC2: Ask about application requirements and scale
- For RDS: Ask about database type, size, and backup needs
- For S3: Ask about storage type and access patterns
- For Lambda: Ask about runtime, triggers, and permissions
- For ALB: Ask about load balancing requirements and SSL
- For EKS: Ask about cluster size and workload types
- For CloudWatch: Ask about monitoring and alerting needs

Generate service-organized questions that will collect essential information efficiently."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfwise_template::{parse_resources_source, parse_variables_source, TemplateAnalysis};
    use tfwise_template::{derive_categories, derive_toggle_groups};

    fn analysis() -> TemplateAnalysis {
        let variables = parse_variables_source(
            r#"
variable "project_name" { type = string }
variable "vpc_cidr" {
  type    = string
  default = "10.0.0.0/16"
}
variable "create_ec2" {
  type    = bool
  default = false
}
variable "ec2_instance_type" {
  type    = string
  default = "t3.micro"
}
variable "db_password" {
  type      = string
  sensitive = true
}
"#,
        );
        let resources = parse_resources_source(
            r#"
resource "aws_instance" "web" {}
resource "aws_s3_bucket" "data" {}
"#,
        );
        let categories = derive_categories(&variables);
        let toggle_groups = derive_toggle_groups(&variables);
        let total_variables = variables.len();
        let total_resources = resources.len();
        TemplateAnalysis {
            variables,
            resources,
            categories,
            toggle_groups,
            total_variables,
            total_resources,
        }
    }

    #[test]
    fn context_includes_counts_and_lists() {
        let context = build_context(&analysis());
        assert!(context.contains("VARIABLES FOUND: 5"));
        assert!(context.contains("RESOURCES FOUND: 2"));
        assert!(context.contains("EC2: 1 configuration variables"));
        assert!(context.contains("REQUIRED VARIABLES: project_name, db_password"));
        assert!(context.contains("BOOLEAN FLAGS: create_ec2"));
        assert!(context.contains("SENSITIVE VARIABLES: db_password"));
        assert!(context.contains("AWS SERVICES SUPPORTED: EC2, S3"));
    }

    #[test]
    fn available_services_sorted_with_general() {
        let services = available_services(&analysis());
        assert_eq!(services, vec!["EC2", "GENERAL", "S3"]);
    }

    #[test]
    fn prompt_requests_response_grammar() {
        let prompt = build_question_prompt(&analysis());
        assert!(prompt.contains("Service-name: [SERVICE_NAME]"));
        assert!(prompt.contains("Questions:"));
        assert!(prompt.contains("AVAILABLE AWS SERVICES: EC2, GENERAL, S3"));
    }
}
