//! Data models for parsed Terraform templates.

use serde::{Deserialize, Serialize};

/// Declared type of a Terraform variable, reduced to the closed set the
/// analysis cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    #[default]
    String,
    Bool,
    Number,
    List,
    Map,
}

impl VarType {
    /// Classify a raw `type = ...` token. Complex type expressions collapse
    /// onto their container kind; anything unrecognized is a string.
    pub fn from_expr(expr: &str) -> Self {
        let expr = expr.to_lowercase();
        if expr.contains("bool") {
            VarType::Bool
        } else if expr.contains("number") {
            VarType::Number
        } else if expr.contains("list") || expr.contains("set") {
            VarType::List
        } else if expr.contains("map") || expr.contains("object") {
            VarType::Map
        } else {
            VarType::String
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Bool => "bool",
            VarType::Number => "number",
            VarType::List => "list",
            VarType::Map => "map",
        }
    }
}

impl std::fmt::Display for VarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed default value coerced from a raw HCL token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum VarValue {
    Str(String),
    Bool(bool),
    Int(i64),
    List(Vec<String>),
    /// Brace-delimited or otherwise unrecognized token, kept opaque.
    Raw(String),
}

impl VarValue {
    /// Coerce a raw default token into a typed value.
    ///
    /// Priority: quoted string, boolean literal, all-digit integer,
    /// bracketed list, everything else raw. A brace-delimited token stays
    /// opaque rather than being rejected.
    pub fn coerce(token: &str) -> Self {
        let token = token.trim();
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            return VarValue::Str(token[1..token.len() - 1].to_string());
        }
        match token.to_lowercase().as_str() {
            "true" => return VarValue::Bool(true),
            "false" => return VarValue::Bool(false),
            _ => {}
        }
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = token.parse::<i64>() {
                return VarValue::Int(n);
            }
        }
        if token.starts_with('[') && token.ends_with(']') {
            let inner = token[1..token.len() - 1].trim();
            if inner.is_empty() {
                return VarValue::List(Vec::new());
            }
            let items = inner
                .split(',')
                .map(|item| item.trim().trim_matches('"').to_string())
                .collect();
            return VarValue::List(items);
        }
        VarValue::Raw(token.to_string())
    }

    /// Render the value back as an HCL literal.
    pub fn render(&self) -> String {
        match self {
            VarValue::Str(s) => format!("\"{}\"", s),
            VarValue::Bool(b) => b.to_string(),
            VarValue::Int(n) => n.to_string(),
            VarValue::List(items) => {
                let quoted: Vec<String> =
                    items.iter().map(|i| format!("\"{}\"", i)).collect();
                format!("[{}]", quoted.join(", "))
            }
            VarValue::Raw(raw) => raw.clone(),
        }
    }
}

impl std::fmt::Display for VarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// A configurable parameter declared by the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub description: String,
    /// Raw `type = ...` token as written in the template.
    pub type_expr: String,
    pub declared_type: VarType,
    pub default: Option<VarValue>,
    /// Derived: a variable is required exactly when it has no default.
    pub required: bool,
    pub sensitive: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            type_expr: "string".to_string(),
            declared_type: VarType::String,
            default: None,
            required: true,
            sensitive: false,
        }
    }

    /// Set the default and derive `required` from its presence.
    pub fn with_default(mut self, value: VarValue) -> Self {
        self.default = Some(value);
        self.required = false;
        self
    }
}

/// A declared infrastructure unit, classified under an AWS service tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_type: String,
    pub local_name: String,
    pub service: String,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, local_name: impl Into<String>) -> Self {
        let resource_type = resource_type.into();
        let service = service_for_type(&resource_type).to_string();
        Self {
            resource_type,
            local_name: local_name.into(),
            service,
        }
    }

    /// Composite key `type.name`, unique within one document.
    pub fn key(&self) -> String {
        format!("{}.{}", self.resource_type, self.local_name)
    }
}

/// Service tag for resources whose type is absent from the lookup table.
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// Map a Terraform resource type to its AWS service tag.
///
/// Unknown types fall back to [`UNKNOWN_SERVICE`] rather than failing.
pub fn service_for_type(resource_type: &str) -> &'static str {
    match resource_type {
        "aws_vpc" => "VPC",
        "aws_subnet" => "VPC",
        "aws_internet_gateway" => "VPC",
        "aws_route_table" => "VPC",
        "aws_security_group" => "VPC",
        "aws_nat_gateway" => "VPC",
        "aws_instance" => "EC2",
        "aws_key_pair" => "EC2",
        "aws_eip" => "EC2",
        "aws_lb" => "ELB",
        "aws_lb_target_group" => "ELB",
        "aws_lb_listener" => "ELB",
        "aws_db_instance" => "RDS",
        "aws_db_subnet_group" => "RDS",
        "aws_s3_bucket" => "S3",
        "aws_eks_cluster" => "EKS",
        "aws_iam_role" => "IAM",
        "aws_lambda_function" => "Lambda",
        "aws_cloudwatch_log_group" => "CloudWatch",
        _ => UNKNOWN_SERVICE,
    }
}

/// A named group of variables sharing a service concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub members: Vec<String>,
}

/// A `create_<tag>` flag together with the variables it gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleGroup {
    /// Service tag, i.e. the variable name with the `create_` prefix removed.
    pub service: String,
    pub controlling_variable: String,
    pub dependents: Vec<String>,
}

/// Complete analysis of a template directory, rebuilt fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateAnalysis {
    pub variables: Vec<Variable>,
    pub resources: Vec<Resource>,
    pub categories: Vec<Category>,
    pub toggle_groups: Vec<ToggleGroup>,
    pub total_variables: usize,
    pub total_resources: usize,
}

impl TemplateAnalysis {
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Names of variables with no default.
    pub fn required_variables(&self) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|v| v.required)
            .map(|v| v.name.as_str())
            .collect()
    }

    /// Names of boolean-typed variables.
    pub fn boolean_variables(&self) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|v| v.declared_type == VarType::Bool)
            .map(|v| v.name.as_str())
            .collect()
    }

    /// Names of variables marked sensitive.
    pub fn sensitive_variables(&self) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|v| v.sensitive)
            .map(|v| v.name.as_str())
            .collect()
    }

    /// Sorted, deduplicated service tags present in the resources.
    pub fn service_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.resources.iter().map(|r| r.service.clone()).collect();
        tags.sort();
        tags.dedup();
        tags
    }
}
