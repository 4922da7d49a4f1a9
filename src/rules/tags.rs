use std::collections::BTreeSet;
use std::path::Path;

use crate::foundation::error::{CardError, CardResult};

/// Unordered, de-duplicated, lowercase descriptor tags of one character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeSet<String>,
}

impl TagSet {
    /// Parse a comma-separated tag list. Whitespace around tags and empty entries are dropped.
    pub fn parse(text: &str) -> Self {
        text.split([',', '\n', '\r']).collect()
    }

    /// Read and parse a descriptor file.
    pub fn read(path: &Path) -> CardResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CardError::io(format!("read descriptor '{}': {e}", path.display())))?;
        Ok(Self::parse(&text))
    }

    /// Whether `tag` (already lowercase) is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether any keyword of the list is one of the tags.
    pub fn matches_any<I>(&self, keywords: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        keywords.into_iter().any(|k| self.contains(k.as_ref()))
    }

    /// How many distinct keywords of the list are tags.
    pub fn count_matches<I>(&self, keywords: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let distinct: BTreeSet<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().to_string())
            .collect();
        distinct.iter().filter(|k| self.contains(k)).count()
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the descriptor had no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let tags = iter
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { tags }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rules/tags.rs"]
mod tests;
