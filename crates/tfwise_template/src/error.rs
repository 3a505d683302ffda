//! Error types for template analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while reading template documents.
///
/// Missing documents and unrecognized tokens are not errors: the parser
/// degrades to empty maps and raw values instead. These variants cover the
/// cases where the filesystem itself misbehaves.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template directory not accessible: {0}")]
    DirectoryNotAccessible(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
