//! Service-organized question catalog and its persistence format.
//!
//! The on-disk format is exactly the grammar the response parser accepts,
//! so a serialized catalog parses back to itself:
//!
//! ```text
//! Service-name: VPC
//! Questions:
//! - What environment is this for?
//! - How many subnets do you need?
//!
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IntakeError, IntakeResult};

/// Fixed banner written at the top of the persisted file. Comment lines are
/// ignored by the parser.
const FILE_BANNER: &str = "# Terraform AWS Infrastructure Questions (Service-Organized)\n\
                           # Generated automatically based on template analysis\n";

/// Ordered questions for one service tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceQuestionSet {
    pub service: String,
    pub questions: Vec<String>,
}

/// Ordered collection of question sets, keyed by service tag.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionCatalog {
    sets: Vec<ServiceQuestionSet>,
}

impl QuestionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn sets(&self) -> &[ServiceQuestionSet] {
        &self.sets
    }

    pub fn get(&self, service: &str) -> Option<&ServiceQuestionSet> {
        self.sets.iter().find(|set| set.service == service)
    }

    /// Service tags in catalog order.
    pub fn services(&self) -> Vec<String> {
        self.sets.iter().map(|set| set.service.clone()).collect()
    }

    /// Add a question set. A set with zero questions is dropped; a repeated
    /// service tag replaces the earlier set.
    pub fn push(&mut self, set: ServiceQuestionSet) {
        if set.questions.is_empty() {
            return;
        }
        if let Some(existing) = self.sets.iter_mut().find(|s| s.service == set.service) {
            *existing = set;
        } else {
            self.sets.push(set);
        }
    }

    /// Parse generator output or a persisted file, line by line.
    ///
    /// A `Service-name:` (or `Service:`) header flushes the current bucket
    /// and starts a new one; `- ` and `• ` lines append questions; every
    /// other line is ignored. Parsing never fails.
    pub fn parse(text: &str) -> Self {
        let mut catalog = Self::new();
        let mut current: Option<ServiceQuestionSet> = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(service) = header_service(line) {
                if let Some(set) = current.take() {
                    catalog.push(set);
                }
                current = Some(ServiceQuestionSet {
                    service: service.to_string(),
                    questions: Vec::new(),
                });
            } else if let Some(question) = bullet_text(line) {
                if let Some(set) = current.as_mut() {
                    if !question.is_empty() {
                        set.questions.push(question.to_string());
                    }
                }
            }
            // "Questions:" markers, comments, and prose are skipped.
        }

        if let Some(set) = current.take() {
            catalog.push(set);
        }

        catalog
    }

    /// Serialize into the persistence format. Round-trips through
    /// [`QuestionCatalog::parse`].
    pub fn serialize(&self) -> String {
        let mut out = String::from(FILE_BANNER);
        out.push('\n');
        for set in &self.sets {
            out.push_str(&format!("Service-name: {}\n", set.service));
            out.push_str("Questions:\n");
            for question in &set.questions {
                out.push_str(&format!("- {}\n", question));
            }
            out.push('\n');
        }
        out
    }

    /// Load a catalog from a persisted file.
    pub fn load(path: impl AsRef<Path>) -> IntakeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IntakeError::QuestionsNotFound(path.to_path_buf()));
        }
        debug!("Loading question catalog from {:?}", path);
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Persist the catalog, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> IntakeResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.serialize())?;
        debug!("Saved question catalog to {:?}", path);
        Ok(())
    }
}

fn header_service(line: &str) -> Option<&str> {
    for prefix in ["Service-name:", "Service:"] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Some(rest.trim());
        }
    }
    None
}

fn bullet_text(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("• "))
        .map(str::trim)
}
