//! Configurable set of category labels.

use serde::{Deserialize, Serialize};

/// Labels used when none are configured.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["First", "Second", "Third"];

/// Ordered set of category labels, unique case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet {
    labels: Vec<String>,
}

impl CategorySet {
    /// Build a set from labels. Blank labels are skipped, and later duplicates
    /// (ignoring case) are dropped in favour of the first spelling.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self { labels: Vec::new() };
        for label in labels {
            let label = label.as_ref().trim();
            if !label.is_empty() && set.resolve(label).is_none() {
                set.labels.push(label.to_string());
            }
        }
        set
    }

    /// Canonical spelling of `label`, if it belongs to the set.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        let wanted = label.trim().to_lowercase();
        self.labels
            .iter()
            .find(|l| l.to_lowercase() == wanted)
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}
