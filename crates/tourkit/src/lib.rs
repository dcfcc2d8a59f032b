#![forbid(unsafe_code)]

//! TourKit public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

// --- Core re-exports -------------------------------------------------------

pub use tourkit_core::{CatalogError, DetailDictionary, Step, StepCatalog, StepPosition, TourState};

// --- Engine re-exports -----------------------------------------------------

pub use tourkit_engine::{
    ElementRegistry, EmphasisSink, FIRST_RUN_FLAG, FileFlagStore, FlagStore, FlagStoreError,
    MemoryFlagStore, ScrollAlign, ScrollRequest, ScrollTarget, TooltipLayout, TourController,
    ValidationGate, ValidationSignal,
};

pub use tourkit_engine::positioner::{inline_order, overlay_origin, recompute};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DetailDictionary, ElementRegistry, Step, StepCatalog, StepPosition, TooltipLayout,
        TourController, ValidationGate, ValidationSignal,
    };
}
