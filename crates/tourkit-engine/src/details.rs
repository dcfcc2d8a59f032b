//! Supplementary-detail expansion for the active step.

use tourkit_core::{DetailDictionary, Step};

/// Resolves a step's supplementary text and composes the rendered
/// description.
///
/// Steps with no dictionary entry have no detail affordance: the host
/// should not offer the toggle, and the controller refuses to flip
/// `details_expanded` for them.
#[derive(Debug, Clone, Default)]
pub struct DetailExpander {
    dictionary: DetailDictionary,
}

impl DetailExpander {
    /// Expander over the given dictionary.
    #[must_use]
    pub fn new(dictionary: DetailDictionary) -> Self {
        Self { dictionary }
    }

    /// Supplementary text for `step`, if its title has an entry.
    #[must_use]
    pub fn supplement(&self, step: &Step) -> Option<&str> {
        self.dictionary.get(&step.title)
    }

    /// Whether the detail toggle should be offered for `step`.
    #[must_use]
    pub fn can_expand(&self, step: &Step) -> bool {
        self.dictionary.contains(&step.title)
    }

    /// The description to render: the base text, with the supplement
    /// appended after a blank line when `expanded` and an entry exists.
    #[must_use]
    pub fn description(&self, step: &Step, expanded: bool) -> String {
        match self.supplement(step) {
            Some(extra) if expanded => format!("{}\n\n{extra}", step.description),
            _ => step.description.clone(),
        }
    }
}
