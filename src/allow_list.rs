use anyhow::{Context, Result};
use std::path::Path;

/// Addresses eligible for compensation, in the order they were configured.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    entries: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Loads a JSON array of address strings.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read allow-list {}", path.display()))?;
        let entries: Vec<String> =
            serde_json::from_str(&content).context("Allow-list is not a JSON array of strings")?;
        Ok(Self::new(entries))
    }

    /// Case-insensitive membership check.
    pub fn contains(&self, address: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(address))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
