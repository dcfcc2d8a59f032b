#![forbid(unsafe_code)]

//! Core data model for TourKit.
//!
//! This crate holds the immutable tour description ([`StepCatalog`]), the
//! per-mount mutable state ([`TourState`]) and the supplementary-text
//! dictionary ([`DetailDictionary`]). It has no dependencies and no I/O;
//! everything with side effects lives in `tourkit-engine`.

pub mod detail;
pub mod state;
pub mod step;

pub use detail::DetailDictionary;
pub use state::TourState;
pub use step::{CatalogError, Step, StepCatalog, StepPosition};
