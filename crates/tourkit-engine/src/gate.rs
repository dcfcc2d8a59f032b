//! Per-step validation gating for forward progression.
//!
//! The engine never defines what "valid" means. The host binds a
//! [`ValidationSignal`] to a step title and flips it as its own state
//! changes (required fields filled, selection made, ...). A step with no
//! bound signal is always valid: the gate fails open.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared boolean the host flips to report whether its step is complete.
///
/// Cloning shares the underlying flag, so the host keeps one clone to
/// write and the gate holds another to read.
#[derive(Debug, Clone, Default)]
pub struct ValidationSignal(Arc<AtomicBool>);

impl ValidationSignal {
    /// Create a signal with an initial value.
    #[must_use]
    pub fn new(value: bool) -> Self {
        Self(Arc::new(AtomicBool::new(value)))
    }

    /// Set the signal.
    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Relaxed);
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Lookup from step title to its progression rule.
///
/// `next()`/`finish()` are permitted only while the active step's rule
/// (if any) reads `true`; the host should disable its advance control
/// whenever the same check reads `false`.
#[derive(Debug, Clone, Default)]
pub struct ValidationGate {
    rules: HashMap<String, ValidationSignal>,
}

impl ValidationGate {
    /// Gate with no rules: every step is valid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a rule to a step title, builder style.
    ///
    /// Rebinding a title replaces the previous signal.
    #[must_use]
    pub fn require(mut self, title: impl Into<String>, signal: ValidationSignal) -> Self {
        self.rules.insert(title.into(), signal);
        self
    }

    /// Whether the step with `title` currently permits progression.
    ///
    /// Fail-open: a title with no bound rule is always valid.
    #[must_use]
    pub fn is_valid(&self, title: &str) -> bool {
        self.rules.get(title).is_none_or(ValidationSignal::get)
    }

    /// Whether `title` has a bound rule at all.
    #[must_use]
    pub fn has_rule(&self, title: &str) -> bool {
        self.rules.contains_key(title)
    }
}
