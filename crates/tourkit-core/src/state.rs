//! Mutable per-mount tour state.

/// State owned by the tour controller for the lifetime of one UI mount.
///
/// `current_step` is always a valid index into the catalog the controller
/// was built with; only controller operations may change it. The state is
/// discarded when the tour UI unmounts, so nothing here is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourState {
    /// Index of the active step, in `0..catalog.len()`.
    pub current_step: usize,
    /// Whether the tour overlay is currently shown.
    pub visible: bool,
    /// Whether supplementary detail text is appended to the description.
    pub details_expanded: bool,
}

impl Default for TourState {
    fn default() -> Self {
        Self {
            current_step: 0,
            visible: false,
            details_expanded: false,
        }
    }
}

impl TourState {
    /// Fresh hidden state at step 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
