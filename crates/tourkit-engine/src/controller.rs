//! The tour state machine and its navigation operations.
//!
//! [`TourController`] owns the [`TourState`] for one mount of the tour UI
//! and is the only mutator of the step index. Every operation runs
//! synchronously in response to a discrete UI event; there is no
//! background work. Side effects cross two narrow seams: emphasis goes
//! through the injected [`EmphasisSink`], and the first-run flag goes
//! through the injected [`FlagStore`].
//!
//! # State machine
//!
//! States are `Hidden` and `Visible(i)` for `i` in `0..catalog.len()`.
//!
//! - `show()` makes the tour visible (no index change)
//! - `next()` advances while the gate permits; from the last step it
//!   behaves exactly like `finish()` and hides without advancing
//! - `previous()` steps back, a no-op at step 0
//! - `hide()` / `finish()` return to `Hidden`
//!
//! The machine has no terminal state; `show()` reuses it. Note that
//! `details_expanded` deliberately survives step changes: the shipped
//! behavior keeps the toggle as-is across navigation, and resetting it
//! here would silently change the product.

use tourkit_core::{DetailDictionary, Step, StepCatalog, TourState};

use crate::details::DetailExpander;
use crate::gate::ValidationGate;
use crate::persist::FlagStore;
use crate::positioner::{self, TooltipLayout};
use crate::registry::{ElementRegistry, EmphasisSink};

/// Flag key recording that this installation has auto-shown the tour.
///
/// Reads `true` on a store that never saw the key, which is exactly the
/// "first run" condition.
pub const FIRST_RUN_FLAG: &str = "tour.first-run";

/// Orchestrates one linear guided tour.
///
/// Construction wires in the collaborators explicitly; nothing is reached
/// through ambient state. The registry is a shared clone; host
/// components hold other clones of the same registry and mutate it as
/// they mount and unmount.
///
/// # Example
///
/// ```
/// use tourkit_core::{Step, StepCatalog};
/// use tourkit_engine::{ElementRegistry, MemoryFlagStore, TourController};
///
/// let catalog = StepCatalog::new(vec![
///     Step::new("Welcome", "hello"),
///     Step::new("Done", "bye"),
/// ])
/// .unwrap();
/// let registry: ElementRegistry<u32> = ElementRegistry::new();
///
/// let mut tour = TourController::new(
///     catalog,
///     registry,
///     |_handle: &u32, _on: bool| {},
///     MemoryFlagStore::new(),
/// );
/// tour.mount();
/// assert!(tour.state().visible); // fresh store: first run auto-shows
/// ```
pub struct TourController<H> {
    catalog: StepCatalog,
    state: TourState,
    registry: ElementRegistry<H>,
    gate: ValidationGate,
    expander: DetailExpander,
    emphasis: Box<dyn EmphasisSink<H>>,
    flags: Box<dyn FlagStore>,
}

impl<H: Clone> TourController<H> {
    /// Wire up a controller in the `Hidden` state at step 0.
    #[must_use]
    pub fn new(
        catalog: StepCatalog,
        registry: ElementRegistry<H>,
        emphasis: impl EmphasisSink<H> + 'static,
        flags: impl FlagStore + 'static,
    ) -> Self {
        Self {
            catalog,
            state: TourState::new(),
            registry,
            gate: ValidationGate::new(),
            expander: DetailExpander::default(),
            emphasis: Box::new(emphasis),
            flags: Box::new(flags),
        }
    }

    /// Attach progression rules.
    #[must_use]
    pub fn with_gate(mut self, gate: ValidationGate) -> Self {
        self.gate = gate;
        self
    }

    /// Attach the supplementary-detail dictionary.
    #[must_use]
    pub fn with_details(mut self, dictionary: DetailDictionary) -> Self {
        self.expander = DetailExpander::new(dictionary);
        self
    }

    /// One-shot auto-activation, called when the tour UI mounts.
    ///
    /// Reads the first-run flag (default `true`), and if set shows the
    /// tour and immediately writes the flag to `false` so later mounts,
    /// this session or any after, never auto-show again. A failed flag
    /// write is logged and swallowed; durability loss must not break the
    /// tour itself.
    pub fn mount(&mut self) {
        if !self.flags.get(FIRST_RUN_FLAG) {
            return;
        }
        tracing::debug!("first run detected, auto-showing tour");
        self.show();
        if let Err(e) = self.flags.set(FIRST_RUN_FLAG, false) {
            tracing::warn!(error = %e, "failed to persist first-run flag");
        }
    }

    /// Show the tour at the current step. Idempotent while visible.
    pub fn show(&mut self) {
        if self.state.visible {
            return;
        }
        self.state.visible = true;
        tracing::debug!(step = self.state.current_step, "tour shown");
        self.emphasize(self.state.current_step, true);
    }

    /// Hide the tour, clearing emphasis. The step index is retained.
    pub fn hide(&mut self) {
        if !self.state.visible {
            return;
        }
        self.emphasize(self.state.current_step, false);
        self.state.visible = false;
        tracing::debug!(step = self.state.current_step, "tour hidden");
    }

    /// Advance to the next step, or finish from the last one.
    ///
    /// Rejected (no-op) while the active step's validation rule reads
    /// false, and while hidden.
    pub fn next(&mut self) {
        if !self.state.visible {
            return;
        }
        if !self.can_advance() {
            tracing::debug!(
                step = self.state.current_step,
                title = %self.current_step().title,
                "advance rejected by validation gate"
            );
            return;
        }
        let from = self.state.current_step;
        if from == self.catalog.last_index() {
            self.finish();
            return;
        }
        self.emphasize(from, false);
        self.state.current_step = from + 1;
        tracing::debug!(from, to = self.state.current_step, "advanced to next step");
        self.emphasize(self.state.current_step, true);
    }

    /// Step back. No-op at step 0 and while hidden.
    pub fn previous(&mut self) {
        if !self.state.visible || self.state.current_step == 0 {
            return;
        }
        let from = self.state.current_step;
        self.emphasize(from, false);
        self.state.current_step = from - 1;
        tracing::debug!(from, to = self.state.current_step, "returned to previous step");
        self.emphasize(self.state.current_step, true);
    }

    /// End the tour. Identical to [`hide`](Self::hide); reaching the end
    /// via `next()` on the last step lands here too.
    pub fn finish(&mut self) {
        if !self.state.visible {
            return;
        }
        tracing::debug!(step = self.state.current_step, "tour finished");
        self.hide();
    }

    /// Toggle the supplementary-detail expansion for the active step.
    ///
    /// No-op while hidden or when the active step has no dictionary
    /// entry (the host should not offer the toggle in that case).
    pub fn toggle_details(&mut self) {
        if !self.state.visible || !self.can_expand() {
            return;
        }
        self.state.details_expanded = !self.state.details_expanded;
    }

    /// Whether the gate currently permits `next()`/`finish()` from the
    /// active step. The host disables its advance control while this is
    /// false.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.gate.is_valid(&self.current_step().title)
    }

    /// Whether the active step offers the detail toggle.
    #[must_use]
    pub fn can_expand(&self) -> bool {
        self.expander.can_expand(self.current_step())
    }

    /// The description to render for the active step, honoring the
    /// detail expansion toggle.
    #[must_use]
    pub fn description(&self) -> String {
        self.expander
            .description(self.current_step(), self.state.details_expanded)
    }

    /// Tooltip layout for the active step, or `None` while hidden.
    ///
    /// Recomputed on every call against the live registry.
    #[must_use]
    pub fn layout(&self) -> Option<TooltipLayout> {
        positioner::recompute(&self.catalog, &self.state, &self.registry)
    }

    /// 1-based step number and total, for the host's progress indicator.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.state.current_step + 1, self.catalog.len())
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> &TourState {
        &self.state
    }

    /// The active step definition.
    #[must_use]
    pub fn current_step(&self) -> &Step {
        self.catalog.step(self.state.current_step)
    }

    /// The catalog this controller was built with.
    #[must_use]
    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    /// Apply or clear emphasis on the handle for `index`, if one is
    /// registered right now. Re-queries the registry at call time; a
    /// missing handle skips the effect silently.
    fn emphasize(&mut self, index: usize, on: bool) {
        if let Some(handle) = self.registry.get(index) {
            self.emphasis.set_emphasis(&handle, on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::ValidationSignal;
    use crate::persist::MemoryFlagStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    type EmphasisLog = Rc<RefCell<Vec<(u32, bool)>>>;

    fn recording_sink(log: &EmphasisLog) -> impl FnMut(&u32, bool) + 'static {
        let log = Rc::clone(log);
        move |handle: &u32, on: bool| log.borrow_mut().push((*handle, on))
    }

    fn catalog() -> StepCatalog {
        StepCatalog::new(vec![
            Step::new("A", "first"),
            Step::new("B", "second"),
            Step::new("C", "third"),
        ])
        .unwrap()
    }

    fn controller_with_log() -> (TourController<u32>, EmphasisLog, ElementRegistry<u32>) {
        let log: EmphasisLog = Rc::new(RefCell::new(Vec::new()));
        let registry = ElementRegistry::new();
        registry.register(0, 100);
        registry.register(1, 101);
        registry.register(2, 102);
        let tour = TourController::new(
            catalog(),
            registry.clone(),
            recording_sink(&log),
            MemoryFlagStore::new(),
        );
        (tour, log, registry)
    }

    // ── show / hide ─────────────────────────────────────────────────

    #[test]
    fn show_makes_visible_without_changing_index() {
        let (mut tour, _, _) = controller_with_log();
        tour.show();
        assert!(tour.state().visible);
        assert_eq!(tour.state().current_step, 0);
    }

    #[test]
    fn show_applies_emphasis_to_current_handle() {
        let (mut tour, log, _) = controller_with_log();
        tour.show();
        assert_eq!(*log.borrow(), [(100, true)]);
    }

    #[test]
    fn show_is_idempotent_while_visible() {
        let (mut tour, log, _) = controller_with_log();
        tour.show();
        tour.show();
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn hide_clears_emphasis_and_retains_index() {
        let (mut tour, log, _) = controller_with_log();
        tour.show();
        tour.next();
        tour.hide();
        assert!(!tour.state().visible);
        assert_eq!(tour.state().current_step, 1);
        assert_eq!(log.borrow().last(), Some(&(101, false)));
    }

    #[test]
    fn hide_while_hidden_is_noop() {
        let (mut tour, log, _) = controller_with_log();
        tour.hide();
        assert!(log.borrow().is_empty());
    }

    // ── next / previous ─────────────────────────────────────────────

    #[test]
    fn next_advances_and_moves_emphasis() {
        let (mut tour, log, _) = controller_with_log();
        tour.show();
        tour.next();
        assert_eq!(tour.state().current_step, 1);
        assert_eq!(*log.borrow(), [(100, true), (100, false), (101, true)]);
    }

    #[test]
    fn next_at_last_step_finishes_without_advancing() {
        let (mut tour, _, _) = controller_with_log();
        tour.show();
        tour.next();
        tour.next();
        assert_eq!(tour.state().current_step, 2);
        tour.next();
        assert!(!tour.state().visible);
        assert_eq!(tour.state().current_step, 2);
    }

    #[test]
    fn next_while_hidden_is_noop() {
        let (mut tour, _, _) = controller_with_log();
        tour.next();
        assert_eq!(tour.state().current_step, 0);
        assert!(!tour.state().visible);
    }

    #[test]
    fn previous_at_step_zero_is_noop() {
        let (mut tour, log, _) = controller_with_log();
        tour.show();
        let before = *tour.state();
        tour.previous();
        assert_eq!(*tour.state(), before);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn previous_steps_back_and_moves_emphasis() {
        let (mut tour, log, _) = controller_with_log();
        tour.show();
        tour.next();
        tour.previous();
        assert_eq!(tour.state().current_step, 0);
        assert_eq!(log.borrow().last(), Some(&(100, true)));
    }

    // ── emphasis with missing handles ───────────────────────────────

    #[test]
    fn missing_handle_skips_emphasis_silently() {
        let log: EmphasisLog = Rc::new(RefCell::new(Vec::new()));
        let registry: ElementRegistry<u32> = ElementRegistry::new();
        registry.register(1, 101);
        let mut tour = TourController::new(
            catalog(),
            registry,
            recording_sink(&log),
            MemoryFlagStore::new(),
        );
        tour.show(); // step 0 has no handle
        assert!(log.borrow().is_empty());
        tour.next();
        assert_eq!(*log.borrow(), [(101, true)]);
    }

    #[test]
    fn unmount_between_apply_and_clear_skips_clear() {
        let (mut tour, log, registry) = controller_with_log();
        tour.show();
        registry.unregister(0);
        tour.next();
        // No (100, false): the handle vanished before the clear.
        assert_eq!(*log.borrow(), [(100, true), (101, true)]);
    }

    // ── validation gating ───────────────────────────────────────────

    #[test]
    fn gated_step_blocks_next_until_signal_flips() {
        let ready = ValidationSignal::new(false);
        let log: EmphasisLog = Rc::new(RefCell::new(Vec::new()));
        let mut tour = TourController::new(
            catalog(),
            ElementRegistry::new(),
            recording_sink(&log),
            MemoryFlagStore::new(),
        )
        .with_gate(ValidationGate::new().require("B", ready.clone()));

        tour.show();
        tour.next();
        assert_eq!(tour.state().current_step, 1);

        tour.next();
        assert_eq!(tour.state().current_step, 1);
        assert!(!tour.can_advance());

        ready.set(true);
        assert!(tour.can_advance());
        tour.next();
        assert_eq!(tour.state().current_step, 2);
    }

    #[test]
    fn gate_blocks_finish_via_next_on_last_step() {
        let ready = ValidationSignal::new(false);
        let mut tour = TourController::new(
            catalog(),
            ElementRegistry::<u32>::new(),
            |_: &u32, _: bool| {},
            MemoryFlagStore::new(),
        )
        .with_gate(ValidationGate::new().require("C", ready.clone()));

        tour.show();
        tour.next();
        tour.next();
        tour.next();
        assert!(tour.state().visible);

        ready.set(true);
        tour.next();
        assert!(!tour.state().visible);
    }

    // ── details ─────────────────────────────────────────────────────

    #[test]
    fn toggle_details_flips_only_with_dictionary_entry() {
        let mut tour = TourController::new(
            catalog(),
            ElementRegistry::<u32>::new(),
            |_: &u32, _: bool| {},
            MemoryFlagStore::new(),
        )
        .with_details(DetailDictionary::new().entry("A", "extra on A"));

        tour.show();
        assert!(tour.can_expand());
        tour.toggle_details();
        assert!(tour.state().details_expanded);
        assert_eq!(tour.description(), "first\n\nextra on A");

        tour.next(); // "B" has no entry
        assert!(!tour.can_expand());
        let expanded_before = tour.state().details_expanded;
        tour.toggle_details();
        assert_eq!(tour.state().details_expanded, expanded_before);
        assert_eq!(tour.description(), "second");
    }

    #[test]
    fn details_expansion_survives_navigation() {
        let mut tour = TourController::new(
            catalog(),
            ElementRegistry::<u32>::new(),
            |_: &u32, _: bool| {},
            MemoryFlagStore::new(),
        )
        .with_details(
            DetailDictionary::new()
                .entry("A", "a+")
                .entry("B", "b+"),
        );
        tour.show();
        tour.toggle_details();
        tour.next();
        // Quirk preserved: the toggle is not reset by navigation.
        assert!(tour.state().details_expanded);
        assert_eq!(tour.description(), "second\n\nb+");
    }

    // ── auto-activation ─────────────────────────────────────────────

    /// Test double standing in for the durable store: clones share the
    /// same flags, so a second "mount" observes the first one's write.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryFlagStore>>);

    impl FlagStore for SharedStore {
        fn get(&self, key: &str) -> bool {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: bool) -> Result<(), crate::FlagStoreError> {
            self.0.borrow_mut().set(key, value)
        }
    }

    #[test]
    fn first_mount_auto_shows_and_consumes_flag() {
        let store = SharedStore::default();
        {
            let mut tour = TourController::new(
                catalog(),
                ElementRegistry::<u32>::new(),
                |_: &u32, _: bool| {},
                store.clone(),
            );
            tour.mount();
            assert!(tour.state().visible);
            assert_eq!(tour.state().current_step, 0);
        }
        assert!(!store.get(FIRST_RUN_FLAG));

        // Second mount against the same durable store: no auto-show.
        let mut tour = TourController::new(
            catalog(),
            ElementRegistry::<u32>::new(),
            |_: &u32, _: bool| {},
            store.clone(),
        );
        tour.mount();
        assert!(!tour.state().visible);
        assert!(!store.get(FIRST_RUN_FLAG));
    }

    #[test]
    fn mount_with_consumed_flag_does_not_auto_show() {
        let mut store = MemoryFlagStore::new();
        store.set(FIRST_RUN_FLAG, false).unwrap();
        let mut tour = TourController::new(
            catalog(),
            ElementRegistry::<u32>::new(),
            |_: &u32, _: bool| {},
            store,
        );
        tour.mount();
        assert!(!tour.state().visible);
    }

    // ── read surface ────────────────────────────────────────────────

    #[test]
    fn progress_is_one_based() {
        let (mut tour, _, _) = controller_with_log();
        assert_eq!(tour.progress(), (1, 3));
        tour.show();
        tour.next();
        assert_eq!(tour.progress(), (2, 3));
    }

    #[test]
    fn layout_is_none_while_hidden() {
        let (tour, _, _) = controller_with_log();
        assert!(tour.layout().is_none());
    }

    #[test]
    fn current_step_tracks_index() {
        let (mut tour, _, _) = controller_with_log();
        tour.show();
        tour.next();
        assert_eq!(tour.current_step().title, "B");
        assert_eq!(tour.catalog().len(), 3);
    }
}
