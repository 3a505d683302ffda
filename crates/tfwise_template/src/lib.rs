//! # tfwise_template
//!
//! Terraform template parsing and analysis for tfwise.
//!
//! This crate turns the raw text of a template directory into a typed model:
//! variables with coerced defaults, resources classified under AWS service
//! tags, keyword-based variable categories, and `create_*` toggle groups.
//!
//! Parsing is deliberately forgiving: missing documents become empty halves,
//! unrecognized default tokens are kept as raw strings, and unknown resource
//! types map to an `Unknown` service tag.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tfwise_template::TemplateParser;
//!
//! let parser = TemplateParser::new("sample_tf");
//! let analysis = parser.analyze().unwrap();
//! println!(
//!     "{} variables across {} resources",
//!     analysis.total_variables, analysis.total_resources
//! );
//! ```

pub mod categorize;
pub mod error;
pub mod models;
pub mod parser;
pub mod scanner;

pub use categorize::{derive_categories, derive_toggle_groups, GENERAL_CATEGORY, TOGGLE_PREFIX};
pub use error::{TemplateError, TemplateResult};
pub use models::{
    service_for_type, Category, Resource, TemplateAnalysis, ToggleGroup, VarType, VarValue,
    Variable, UNKNOWN_SERVICE,
};
pub use parser::{parse_resources_source, parse_variables_source, TemplateParser};
