//! Step definitions and the validated, immutable step catalog.
//!
//! A tour is a fixed ordered sequence of [`Step`]s. The catalog is built
//! once at startup and never mutated; every index handed around by the
//! engine is expected to stay inside `0..catalog.len()` for the process
//! lifetime.
//!
//! # Example
//!
//! ```
//! use tourkit_core::step::{Step, StepCatalog, StepPosition};
//!
//! let catalog = StepCatalog::new(vec![
//!     Step::new("Welcome", "The basics").position(StepPosition::Center),
//!     Step::new("Schedule", "Pick your days"),
//! ])
//! .unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.step(0).title, "Welcome");
//! ```

use std::collections::HashSet;
use std::fmt;

/// Placement mode for a step's tooltip.
///
/// `Start` and `End` render the tooltip inline among sibling content and
/// control which edge of the target element the viewport aligns to when
/// scrolling. `Center` renders the tooltip as a floating overlay anchored
/// at the viewport center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepPosition {
    /// Inline tooltip; scroll aligns to the target's leading edge.
    #[default]
    Start,
    /// Floating overlay centered in the viewport.
    Center,
    /// Inline tooltip; scroll aligns to the target's trailing edge.
    End,
}

impl StepPosition {
    /// Whether this step renders as a centered overlay rather than inline.
    #[must_use]
    pub fn is_overlay(self) -> bool {
        matches!(self, Self::Center)
    }
}

/// One unit of a tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Step title. Unique within a catalog; validation and detail lookups
    /// key on it.
    pub title: String,
    /// Base description shown in the tooltip.
    pub description: String,
    /// Tooltip placement mode.
    pub position: StepPosition,
    /// Opaque content key the host resolves to extra interactive content
    /// (e.g. an embedded control rendered inside the tooltip).
    pub action: Option<String>,
}

impl Step {
    /// Create an inline step with the given title and description.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            position: StepPosition::default(),
            action: None,
        }
    }

    /// Set the placement mode.
    #[must_use]
    pub fn position(mut self, position: StepPosition) -> Self {
        self.position = position;
        self
    }

    /// Attach an opaque action content key.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Error constructing a [`StepCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A catalog must contain at least one step.
    Empty,
    /// Two steps share a title. Titles key validation rules and detail
    /// lookups, so duplicates would bind the wrong rule silently.
    DuplicateTitle(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "step catalog is empty"),
            Self::DuplicateTitle(title) => {
                write!(f, "duplicate step title: {title:?}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Static, ordered, immutable list of [`Step`]s.
///
/// Title uniqueness is enforced here, at construction, so that lookups by
/// title elsewhere never need to re-check it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCatalog {
    steps: Vec<Step>,
}

impl StepCatalog {
    /// Validate and build a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] for an empty step list and
    /// [`CatalogError::DuplicateTitle`] when two steps share a title.
    pub fn new(steps: Vec<Step>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.title.as_str()) {
                return Err(CatalogError::DuplicateTitle(step.title.clone()));
            }
        }
        Ok(Self { steps })
    }

    /// Number of steps (always at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; kept for API symmetry with collection types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the last step.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// The step at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. The catalog is immutable and the
    /// controller is the sole mutator of the step index, so an out-of-range
    /// index is a programming error, not a recoverable condition.
    #[must_use]
    pub fn step(&self, index: usize) -> &Step {
        assert!(
            index < self.steps.len(),
            "step index {index} out of range (catalog has {} steps)",
            self.steps.len()
        );
        &self.steps[index]
    }

    /// Non-panicking access, for callers that tolerate absence.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Iterate over the steps in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Number of overlay (`Center`) steps strictly before `index`.
    ///
    /// Overlay steps do not participate in inline flow, so inline ordering
    /// excludes them from the count.
    #[must_use]
    pub fn overlays_before(&self, index: usize) -> usize {
        self.steps[..index.min(self.steps.len())]
            .iter()
            .filter(|s| s.position.is_overlay())
            .count()
    }
}
