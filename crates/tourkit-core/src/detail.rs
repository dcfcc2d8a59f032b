//! Supplementary-text dictionary keyed by step title.

use std::collections::HashMap;

/// Read-only mapping from step title to supplementary explanatory text.
///
/// Built once at startup alongside the catalog. Lookup is exact-match on
/// the title; the catalog guarantees title uniqueness at construction, so
/// a hit here is unambiguous. A step with no entry simply has no detail
/// affordance; absence is not an error.
#[derive(Debug, Clone, Default)]
pub struct DetailDictionary {
    entries: HashMap<String, String>,
}

impl DetailDictionary {
    /// Empty dictionary (no step offers extra detail).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style.
    #[must_use]
    pub fn entry(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(title.into(), text.into());
        self
    }

    /// Supplementary text for `title`, if any.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries.get(title).map(String::as_str)
    }

    /// Whether `title` has supplementary text.
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Into<String>, U: Into<String>> FromIterator<(T, U)> for DetailDictionary {
    fn from_iter<I: IntoIterator<Item = (T, U)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(title, text)| (title.into(), text.into()))
                .collect(),
        }
    }
}
