//! Info command - analyze the template and print a summary.

use anyhow::Result;
use clap::Args;
use tracing::info;

use tfwise_template::TemplateParser;

use super::TemplateArgs;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub template: TemplateArgs,
}

pub async fn execute(args: InfoArgs) -> Result<()> {
    info!("Analyzing template in {}", args.template.template_dir);

    let parser = TemplateParser::new(&args.template.template_dir);
    let analysis = parser.analyze()?;

    println!("TERRAFORM TEMPLATE ANALYSIS");
    println!("{}", "=".repeat(50));
    println!("Variables: {}", analysis.total_variables);
    println!("Resources: {}", analysis.total_resources);

    if !analysis.categories.is_empty() {
        println!("\nVariable categories:");
        for category in &analysis.categories {
            println!("  {}: {} variables", category.name, category.members.len());
        }
    }

    if !analysis.toggle_groups.is_empty() {
        println!("\nToggleable services:");
        for group in &analysis.toggle_groups {
            println!(
                "  {} ({} dependent variables)",
                group.service.to_uppercase(),
                group.dependents.len()
            );
        }
    }

    let services = analysis.service_tags();
    if !services.is_empty() {
        println!("\nAWS services: {}", services.join(", "));
    }

    Ok(())
}
