//! Rendering of final assignments into a terraform.tfvars document.

use chrono::Local;

use tfwise_template::TemplateAnalysis;

use crate::synth::FinalAssignment;

/// Render assignments grouped under category comment headers.
///
/// Only variables with an assignment are emitted; variable descriptions
/// become inline comments above their line.
pub fn render_tfvars(analysis: &TemplateAnalysis, assignments: &[FinalAssignment]) -> String {
    let mut lines = vec![
        "# Terraform Variables File".to_string(),
        "# Generated for AWS Infrastructure Deployment".to_string(),
        format!("# Generated on: {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
        String::new(),
    ];

    for category in &analysis.categories {
        let members: Vec<&FinalAssignment> = category
            .members
            .iter()
            .filter_map(|name| assignments.iter().find(|a| &a.name == name))
            .collect();
        if members.is_empty() {
            continue;
        }

        lines.push(format!("# {} Configuration", category.name));
        for assignment in members {
            if let Some(variable) = analysis.variable(&assignment.name) {
                if !variable.description.is_empty() {
                    lines.push(format!("# {}", variable.description));
                }
            }
            lines.push(assignment.render());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Basic validation of generated tfvars content: non-empty with at least
/// one non-comment assignment line.
pub fn validate_tfvars(content: &str) -> bool {
    if content.trim().is_empty() {
        return false;
    }
    content
        .lines()
        .any(|line| !line.trim_start().starts_with('#') && line.contains('='))
}
