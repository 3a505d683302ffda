//! Terraform template parser.
//!
//! Reads the variables and main documents from a template directory and
//! builds the typed analysis model. Missing documents degrade to empty
//! halves; unrecognized tokens are retained as raw values.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, warn};

use crate::categorize::{derive_categories, derive_toggle_groups};
use crate::error::{TemplateError, TemplateResult};
use crate::models::{Resource, TemplateAnalysis, VarType, VarValue, Variable};
use crate::scanner::extract_blocks;

/// Default file name for variable declarations.
pub const VARIABLES_FILE: &str = "variables.tf";
/// Default file name for resource declarations.
pub const MAIN_FILE: &str = "main.tf";

/// Parser for a Terraform template directory.
pub struct TemplateParser {
    template_dir: PathBuf,
    variables_file: String,
    main_file: String,
}

impl TemplateParser {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            variables_file: VARIABLES_FILE.to_string(),
            main_file: MAIN_FILE.to_string(),
        }
    }

    /// Override the document file names.
    pub fn with_files(
        mut self,
        variables_file: impl Into<String>,
        main_file: impl Into<String>,
    ) -> Self {
        self.variables_file = variables_file.into();
        self.main_file = main_file.into();
        self
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Parse the variables document. A missing file yields an empty list.
    pub fn parse_variables(&self) -> TemplateResult<Vec<Variable>> {
        let path = self.template_dir.join(&self.variables_file);
        if !path.exists() {
            warn!("Variables file not found: {:?}", path);
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(parse_variables_source(&content))
    }

    /// Parse the resources document. A missing file yields an empty list.
    pub fn parse_resources(&self) -> TemplateResult<Vec<Resource>> {
        let path = self.template_dir.join(&self.main_file);
        if !path.exists() {
            warn!("Main file not found: {:?}", path);
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(parse_resources_source(&content))
    }

    /// Perform a complete analysis of the template directory.
    ///
    /// The model is rebuilt fresh on every call; nothing is cached.
    pub fn analyze(&self) -> TemplateResult<TemplateAnalysis> {
        if !self.template_dir.is_dir() {
            return Err(TemplateError::DirectoryNotAccessible(
                self.template_dir.clone(),
            ));
        }
        let variables = self.parse_variables()?;
        let resources = self.parse_resources()?;
        debug!(
            "Analyzed template: {} variables, {} resources",
            variables.len(),
            resources.len()
        );

        let categories = derive_categories(&variables);
        let toggle_groups = derive_toggle_groups(&variables);
        let total_variables = variables.len();
        let total_resources = resources.len();

        Ok(TemplateAnalysis {
            variables,
            resources,
            categories,
            toggle_groups,
            total_variables,
            total_resources,
        })
    }
}

/// Parse variable declarations from document text.
pub fn parse_variables_source(content: &str) -> Vec<Variable> {
    let mut variables = Vec::new();
    for block in extract_blocks(content, "variable") {
        let name = match block.labels.first() {
            Some(name) => name.clone(),
            None => continue,
        };
        // Later declarations of the same name replace earlier ones so that
        // names stay unique within one analysis run.
        let variable = parse_variable_body(&name, &block.body);
        if let Some(existing) = variables.iter_mut().find(|v: &&mut Variable| v.name == name) {
            *existing = variable;
        } else {
            variables.push(variable);
        }
    }
    variables
}

/// Parse resource declarations from document text.
pub fn parse_resources_source(content: &str) -> Vec<Resource> {
    extract_blocks(content, "resource")
        .into_iter()
        .filter_map(|block| match block.labels.as_slice() {
            [resource_type, local_name, ..] => {
                Some(Resource::new(resource_type.clone(), local_name.clone()))
            }
            _ => None,
        })
        .collect()
}

/// Extract the typed fields from one variable body.
fn parse_variable_body(name: &str, body: &str) -> Variable {
    let mut variable = Variable::new(name);

    if let Some(description) = capture(body, r#"description\s*=\s*"([^"]*)""#) {
        variable.description = description;
    }

    if let Some(type_expr) = capture(body, r"type\s*=\s*([^\n]+)") {
        let type_expr = type_expr.trim().to_string();
        variable.declared_type = VarType::from_expr(&type_expr);
        variable.type_expr = type_expr;
    }

    if let Some(default_token) = capture(body, r"default\s*=\s*([^\n]+)") {
        variable.default = Some(VarValue::coerce(default_token.trim()));
        variable.required = false;
    }

    // Sensitivity is a simple token check, matching what templates actually
    // write: `sensitive = true` on its own line.
    if capture(body, r"sensitive\s*=\s*(true)").is_some() {
        variable.sensitive = true;
    }

    variable
}

fn capture(body: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(body).map(|caps| caps[1].to_string())
}
