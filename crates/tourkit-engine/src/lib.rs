#![forbid(unsafe_code)]

//! Tour orchestration engine for TourKit.
//!
//! The engine drives one linear guided tour: it owns the step state
//! machine ([`TourController`]), applies emphasis to host-registered
//! element handles ([`ElementRegistry`] + [`EmphasisSink`]), computes
//! tooltip layout and scroll targets ([`positioner`]), gates forward
//! progression on host-supplied signals ([`ValidationGate`]) and consumes
//! the durable first-run flag ([`FlagStore`]) to auto-show the tour once
//! per installation.
//!
//! The engine renders nothing. Every visual effect crosses a narrow
//! contract: emphasis through [`EmphasisSink::set_emphasis`], scrolling
//! through [`positioner::ScrollRequest`] values the host executes.

pub mod controller;
pub mod details;
pub mod gate;
pub mod persist;
pub mod positioner;
pub mod registry;

pub use controller::{FIRST_RUN_FLAG, TourController};
pub use details::DetailExpander;
pub use gate::{ValidationGate, ValidationSignal};
pub use persist::{FileFlagStore, FlagStore, FlagStoreError, MemoryFlagStore};
pub use positioner::{ScrollAlign, ScrollRequest, ScrollTarget, TooltipLayout};
pub use registry::{ElementRegistry, EmphasisSink};
