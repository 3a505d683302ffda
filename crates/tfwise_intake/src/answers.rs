//! Answer records collected during elicitation.

use serde::{Deserialize, Serialize};

/// One raw operator answer, scoped to a service bucket and question ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub service: String,
    /// 1-based position of the question within its bucket.
    pub ordinal: usize,
    pub text: String,
}

impl AnswerRecord {
    /// Namespaced key, e.g. `vpc_q2`, avoiding collisions across services.
    pub fn key(&self) -> String {
        format!("{}_q{}", self.service.to_lowercase(), self.ordinal)
    }
}

/// Ordered key/value set of collected and derived configuration entries.
///
/// Insertion order is preserved; inserting an existing key overwrites its
/// value in place, which gives derived values last-match-wins semantics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerSet {
    entries: Vec<(String, String)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}
