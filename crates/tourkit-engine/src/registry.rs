//! Shared element-handle registry and the emphasis contract.
//!
//! Host components register an opaque handle for their step index when
//! they mount and unregister it when they unmount; the controller
//! re-queries at the moment it applies or clears emphasis. Handles can
//! appear and disappear at any time relative to tour state changes, so
//! absence is an expected condition everywhere, never an error.
//!
//! # Design Invariants
//!
//! 1. **No caching**: [`ElementRegistry::get`] reads the live map on every
//!    call. Callers must not hold a handle across a state change.
//! 2. **Shared by cloning**: cloning the registry clones an `Arc`; all
//!    clones observe the same entries. The registry is handed to host
//!    components and the controller explicitly, never through ambient
//!    global state.
//! 3. **At most one emphasized handle**: enforced by the controller, which
//!    is the only caller of [`EmphasisSink::set_emphasis`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Registry mapping step index to an optional host element handle.
///
/// `H` is whatever the host uses to address a UI region (an id, a node
/// reference, a weak pointer). The registry clones it out on `get`, so it
/// should be cheap to clone.
pub struct ElementRegistry<H> {
    entries: Arc<RwLock<HashMap<usize, H>>>,
}

impl<H> Clone for ElementRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<H> Default for ElementRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ElementRegistry<H> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register (or replace) the handle for `step_index`.
    ///
    /// A poisoned lock drops the registration silently; registry
    /// operations are no-ops rather than errors by contract.
    pub fn register(&self, step_index: usize, handle: H) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(step_index, handle);
        }
    }

    /// Remove the handle for `step_index`, if present.
    pub fn unregister(&self, step_index: usize) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(&step_index);
        }
    }

    /// Number of currently registered handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether no handles are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H: Clone> ElementRegistry<H> {
    /// The handle currently registered for `step_index`, if any.
    ///
    /// Re-reads the live map on every call; a poisoned lock reads as
    /// absent.
    #[must_use]
    pub fn get(&self, step_index: usize) -> Option<H> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(&step_index).cloned())
    }
}

impl<H> fmt::Debug for ElementRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRegistry")
            .field("entries", &self.len())
            .finish()
    }
}

/// Contract through which the controller raises or restores a handle's
/// visual stacking priority.
///
/// The controller never touches rendering details; it only reports which
/// handle should carry elevated emphasis (`on = true`) or return to
/// baseline (`on = false`). What "elevated" means visually is the host's
/// choice.
pub trait EmphasisSink<H> {
    /// Apply (`on = true`) or clear (`on = false`) emphasis on `handle`.
    fn set_emphasis(&mut self, handle: &H, on: bool);
}

impl<H, F: FnMut(&H, bool)> EmphasisSink<H> for F {
    fn set_emphasis(&mut self, handle: &H, on: bool) {
        self(handle, on);
    }
}
