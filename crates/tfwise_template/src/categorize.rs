//! Variable categorization and toggle-group derivation.

use crate::models::{Category, ToggleGroup, Variable};

/// Prefix marking a boolean service toggle, e.g. `create_ec2`.
pub const TOGGLE_PREFIX: &str = "create_";

/// Category definitions in matching priority order. The first category whose
/// keyword set matches a substring of the variable name wins; anything left
/// over lands in `General`.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("General", &["project", "region", "tag"]),
    ("VPC", &["vpc", "subnet", "igw", "nat", "route"]),
    ("EC2", &["ec2", "instance", "key_pair", "ami"]),
    ("Load Balancer", &["alb", "load_balancer", "target_group"]),
    ("RDS", &["rds", "database", "db_"]),
    ("S3", &["s3"]),
    ("EKS", &["eks"]),
    ("Lambda", &["lambda"]),
    ("CloudWatch", &["cloudwatch"]),
];

/// Name of the catch-all category.
pub const GENERAL_CATEGORY: &str = "General";

/// Group variables into service categories.
///
/// Categorization is total: every variable lands in exactly one category.
/// Categories with no members are omitted.
pub fn derive_categories(variables: &[Variable]) -> Vec<Category> {
    let mut buckets: Vec<Category> = CATEGORY_KEYWORDS
        .iter()
        .map(|(name, _)| Category {
            name: name.to_string(),
            members: Vec::new(),
        })
        .collect();

    for variable in variables {
        let name_lower = variable.name.to_lowercase();
        let index = CATEGORY_KEYWORDS
            .iter()
            .position(|(_, keywords)| keywords.iter().any(|k| name_lower.contains(k)))
            .unwrap_or(0); // General
        buckets[index].members.push(variable.name.clone());
    }

    buckets.retain(|category| !category.members.is_empty());
    buckets
}

/// Derive toggle groups from `create_<tag>` flag variables.
///
/// Every other variable whose name contains the tag substring is collected
/// as a dependent; a group with no dependents is still reported.
pub fn derive_toggle_groups(variables: &[Variable]) -> Vec<ToggleGroup> {
    let mut groups = Vec::new();

    for variable in variables {
        let Some(service) = variable.name.strip_prefix(TOGGLE_PREFIX) else {
            continue;
        };
        let dependents = variables
            .iter()
            .filter(|other| {
                other.name.contains(service) && !other.name.starts_with(TOGGLE_PREFIX)
            })
            .map(|other| other.name.clone())
            .collect();

        groups.push(ToggleGroup {
            service: service.to_string(),
            controlling_variable: variable.name.clone(),
            dependents,
        });
    }

    groups
}
