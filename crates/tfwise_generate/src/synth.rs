//! Assignment synthesis: defaults, toggle overlays, and answer mappings
//! merged into final typed variable assignments.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tfwise_intake::AnswerSet;
use tfwise_template::{TemplateAnalysis, VarType, VarValue};

/// Service tags whose presence in an answer key enables the matching
/// `create_<tag>` flag.
const TOGGLEABLE_SERVICES: &[&str] = &[
    "vpc", "ec2", "rds", "s3", "lambda", "alb", "eks", "cloudwatch",
];

/// Substring triggers mapping answer keys onto fixed target variables. An
/// empty second pattern means the first alone decides.
const KEY_MAPPINGS: &[(&str, &str, &str)] = &[
    ("cidr", "", "vpc_cidr"),
    ("instance_type", "", "instance_type"),
    ("engine", "rds", "db_engine"),
    ("bucket", "", "s3_bucket_name"),
    ("runtime", "lambda", "lambda_runtime"),
];

/// A fully typed, formatted variable assignment ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalAssignment {
    pub name: String,
    pub value: VarValue,
}

impl FinalAssignment {
    /// Render as a `name = value` line.
    pub fn render(&self) -> String {
        format!("{} = {}", self.name, self.value.render())
    }
}

/// Merge defaults, service toggles, and answer-derived values into final
/// assignments.
///
/// Overlay values that cannot be coerced to the variable's declared type
/// are dropped, leaving the default in place. Variables without a default
/// and without an overlay produce no assignment.
pub fn synthesize(analysis: &TemplateAnalysis, answers: &AnswerSet) -> Vec<FinalAssignment> {
    let mut assignments: Vec<FinalAssignment> = Vec::new();

    // Seed with template defaults.
    for variable in &analysis.variables {
        if let Some(default) = &variable.default {
            assignments.push(FinalAssignment {
                name: variable.name.clone(),
                value: default.clone(),
            });
        }
    }

    // Enable create_<tag> for every service referenced by an answer key.
    for key in answers.keys() {
        let prefix = key.split('_').next().unwrap_or_default().to_lowercase();
        if TOGGLEABLE_SERVICES.contains(&prefix.as_str()) {
            overlay(
                &mut assignments,
                analysis,
                &format!("create_{}", prefix),
                "true",
            );
        }
    }

    // Fixed substring-triggered mappings from answer keys to variables.
    // Each key lands on at most one target: the first mapping that matches.
    for (key, value) in answers.iter() {
        let key_lower = key.to_lowercase();
        for (first, second, target) in KEY_MAPPINGS {
            if key_lower.contains(first) && (second.is_empty() || key_lower.contains(second)) {
                overlay(&mut assignments, analysis, target, value);
                break;
            }
        }
    }

    assignments
}

/// Overlay one value onto the assignment list, coercing it to the target
/// variable's declared type. Unknown targets and uncoercible values are
/// skipped.
fn overlay(
    assignments: &mut Vec<FinalAssignment>,
    analysis: &TemplateAnalysis,
    name: &str,
    raw: &str,
) {
    let Some(variable) = analysis.variable(name) else {
        debug!("Skipping overlay for unknown variable {}", name);
        return;
    };
    let Some(value) = coerce_to(raw, variable.declared_type) else {
        debug!(
            "Value {:?} not coercible to {} for {}; keeping default",
            raw, variable.declared_type, name
        );
        return;
    };

    if let Some(existing) = assignments.iter_mut().find(|a| a.name == name) {
        existing.value = value;
    } else {
        assignments.push(FinalAssignment {
            name: name.to_string(),
            value,
        });
    }
}

/// Coerce a raw answer string to the declared variable type.
///
/// Returns `None` when the value cannot represent the type, which makes
/// the caller fall back to the default rather than erroring.
pub fn coerce_to(raw: &str, ty: VarType) -> Option<VarValue> {
    let raw = raw.trim();
    match ty {
        VarType::Bool => match raw.to_lowercase().as_str() {
            "true" => Some(VarValue::Bool(true)),
            "false" => Some(VarValue::Bool(false)),
            _ => None,
        },
        VarType::Number => raw.parse::<i64>().ok().map(VarValue::Int),
        VarType::List => match VarValue::coerce(raw) {
            list @ VarValue::List(_) => Some(list),
            VarValue::Str(s) => Some(VarValue::List(vec![s])),
            VarValue::Raw(_) => Some(VarValue::List(vec![raw.to_string()])),
            _ => None,
        },
        VarType::Map => {
            if raw.starts_with('{') && raw.ends_with('}') {
                Some(VarValue::Raw(raw.to_string()))
            } else {
                Some(VarValue::Raw(format!("{{default = \"{}\"}}", raw)))
            }
        }
        VarType::String => Some(VarValue::Str(raw.trim_matches('"').to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfwise_template::{derive_categories, derive_toggle_groups, parse_variables_source};

    fn analysis() -> TemplateAnalysis {
        let variables = parse_variables_source(
            r#"
variable "vpc_cidr" {
  type    = string
  default = "10.0.0.0/16"
}
variable "create_vpc" {
  type    = bool
  default = false
}
variable "create_ec2" {
  type    = bool
  default = false
}
variable "instance_type" {
  type    = string
  default = "t3.micro"
}
variable "ec2_count" {
  type    = number
  default = 2
}
variable "db_engine" {
  type = string
}
"#,
        );
        let categories = derive_categories(&variables);
        let toggle_groups = derive_toggle_groups(&variables);
        let total_variables = variables.len();
        TemplateAnalysis {
            variables,
            resources: Vec::new(),
            categories,
            toggle_groups,
            total_variables,
            total_resources: 0,
        }
    }

    fn find<'a>(assignments: &'a [FinalAssignment], name: &str) -> Option<&'a FinalAssignment> {
        assignments.iter().find(|a| a.name == name)
    }

    #[test]
    fn defaults_seed_the_output() {
        let assignments = synthesize(&analysis(), &AnswerSet::new());
        assert_eq!(
            find(&assignments, "vpc_cidr").unwrap().value,
            VarValue::Str("10.0.0.0/16".to_string())
        );
        assert_eq!(
            find(&assignments, "ec2_count").unwrap().value,
            VarValue::Int(2)
        );
        // No default, no overlay: no assignment.
        assert!(find(&assignments, "db_engine").is_none());
    }

    #[test]
    fn answer_keys_enable_create_flags() {
        let mut answers = AnswerSet::new();
        answers.insert("vpc_q1", "production");
        answers.insert("ec2_q1", "web server");

        let assignments = synthesize(&analysis(), &answers);
        assert_eq!(
            find(&assignments, "create_vpc").unwrap().value,
            VarValue::Bool(true)
        );
        assert_eq!(
            find(&assignments, "create_ec2").unwrap().value,
            VarValue::Bool(true)
        );
    }

    #[test]
    fn substring_mappings_overlay_targets() {
        let mut answers = AnswerSet::new();
        answers.insert("vpc_suggested_cidr", "10.1.0.0/16");
        answers.insert("ec2_suggested_instance_type", "c5.large");
        answers.insert("rds_suggested_engine", "postgres");

        let assignments = synthesize(&analysis(), &answers);
        assert_eq!(
            find(&assignments, "vpc_cidr").unwrap().value,
            VarValue::Str("10.1.0.0/16".to_string())
        );
        assert_eq!(
            find(&assignments, "instance_type").unwrap().value,
            VarValue::Str("c5.large".to_string())
        );
        assert_eq!(
            find(&assignments, "db_engine").unwrap().value,
            VarValue::Str("postgres".to_string())
        );
    }

    #[test]
    fn key_matching_two_mappings_overlays_only_the_first() {
        let variables = parse_variables_source(
            r#"
variable "vpc_cidr" {
  type    = string
  default = "10.0.0.0/16"
}
variable "s3_bucket_name" {
  type    = string
  default = "original-bucket"
}
"#,
        );
        let categories = derive_categories(&variables);
        let toggle_groups = derive_toggle_groups(&variables);
        let total_variables = variables.len();
        let analysis = TemplateAnalysis {
            variables,
            resources: Vec::new(),
            categories,
            toggle_groups,
            total_variables,
            total_resources: 0,
        };

        // The key carries both a cidr and a bucket trigger; only the cidr
        // mapping, listed first, fires.
        let mut answers = AnswerSet::new();
        answers.insert("cidr_bucket_hint", "10.9.0.0/16");

        let assignments = synthesize(&analysis, &answers);
        assert_eq!(
            find(&assignments, "vpc_cidr").unwrap().value,
            VarValue::Str("10.9.0.0/16".to_string())
        );
        assert_eq!(
            find(&assignments, "s3_bucket_name").unwrap().value,
            VarValue::Str("original-bucket".to_string())
        );
    }

    #[test]
    fn uncoercible_overlay_keeps_default() {
        // ec2_count is a number; a prose answer must not clobber it.
        let mut answers = AnswerSet::new();
        answers.insert("some_instance_type_note", "c5.large");

        let mut analysis = analysis();
        // Point the instance_type mapping at a number variable to force a
        // coercion failure.
        analysis
            .variables
            .iter_mut()
            .find(|v| v.name == "instance_type")
            .unwrap()
            .declared_type = VarType::Number;

        let assignments = synthesize(&analysis, &answers);
        assert_eq!(
            find(&assignments, "instance_type").unwrap().value,
            VarValue::Str("t3.micro".to_string())
        );
    }

    #[test]
    fn coerce_to_covers_all_types() {
        assert_eq!(coerce_to("true", VarType::Bool), Some(VarValue::Bool(true)));
        assert_eq!(coerce_to("maybe", VarType::Bool), None);
        assert_eq!(coerce_to("42", VarType::Number), Some(VarValue::Int(42)));
        assert_eq!(coerce_to("lots", VarType::Number), None);
        assert_eq!(
            coerce_to("a", VarType::List),
            Some(VarValue::List(vec!["a".to_string()]))
        );
        assert_eq!(
            coerce_to("x", VarType::Map),
            Some(VarValue::Raw("{default = \"x\"}".to_string()))
        );
        assert_eq!(
            coerce_to("plain", VarType::String),
            Some(VarValue::Str("plain".to_string()))
        );
    }

    #[test]
    fn format_round_trip_for_scalars() {
        // format(coerce(token)) reproduces an equivalent literal.
        for (token, ty) in [
            ("true", VarType::Bool),
            ("7", VarType::Number),
            ("\"web\"", VarType::String),
        ] {
            let value = coerce_to(token.trim_matches('"'), ty).unwrap();
            let rendered = value.render();
            assert_eq!(rendered, token.to_string());
        }
    }
}
