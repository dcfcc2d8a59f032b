//! Tooltip layout and scroll-target computation.
//!
//! [`recompute`] is a pure, synchronous function of the catalog, the tour
//! state and the live registry. The dispatcher calls it after every state
//! transition (and whenever the host re-renders after a mount/unmount);
//! there is no hidden dependency tracking. Scrolling itself is a
//! fire-and-forget visual effect executed by the host. The engine only
//! emits a [`ScrollRequest`] describing it, and a later request simply
//! supersedes an in-flight one.

use tourkit_core::{StepCatalog, StepPosition, TourState};

use crate::registry::ElementRegistry;

/// Viewport edge the scroll should align the target to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Leading edge of the target at the leading edge of the viewport.
    Start,
    /// Target centered in the viewport.
    Center,
    /// Trailing edge of the target at the trailing edge of the viewport.
    End,
}

impl From<StepPosition> for ScrollAlign {
    fn from(position: StepPosition) -> Self {
        match position {
            StepPosition::Start => Self::Start,
            StepPosition::Center => Self::Center,
            StepPosition::End => Self::End,
        }
    }
}

/// What the host should scroll into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// The registered element handle for the given step index.
    Element(usize),
    /// The tooltip itself (used when no handle is registered, and always
    /// for centered overlays).
    Tooltip,
}

/// A fire-and-forget scroll instruction for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// What to bring into view.
    pub target: ScrollTarget,
    /// Alignment of the target within the viewport.
    pub align: ScrollAlign,
    /// Whether the scroll should animate smoothly.
    pub smooth: bool,
}

/// Computed layout for the active step's tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipLayout {
    /// Floating overlay anchored at the viewport center.
    Overlay {
        /// Scroll the tooltip itself into centered view, animated.
        scroll: ScrollRequest,
    },
    /// Tooltip rendered inline among sibling content.
    Inline {
        /// 1-based ordering among inline tooltips. Overlay steps are
        /// excluded from the count so inline steps stay contiguous in
        /// catalog order.
        order: usize,
        /// Scroll the step's element (or the tooltip, if the element is
        /// not mounted) into aligned view.
        scroll: ScrollRequest,
    },
}

impl TooltipLayout {
    /// The scroll instruction, regardless of layout mode.
    #[must_use]
    pub fn scroll(&self) -> ScrollRequest {
        match self {
            Self::Overlay { scroll } | Self::Inline { scroll, .. } => *scroll,
        }
    }
}

/// Inline ordering for a non-overlay step:
/// `1 + index - (overlay steps before index)`.
#[must_use]
pub fn inline_order(catalog: &StepCatalog, index: usize) -> usize {
    1 + index - catalog.overlays_before(index)
}

/// Compute the active step's tooltip layout, or `None` while hidden.
///
/// Idempotent: calling it twice with the same inputs yields the same
/// layout. The registry is consulted at call time, so a handle that
/// mounted or unmounted since the last transition is picked up here.
#[must_use]
pub fn recompute<H: Clone>(
    catalog: &StepCatalog,
    state: &TourState,
    registry: &ElementRegistry<H>,
) -> Option<TooltipLayout> {
    if !state.visible {
        return None;
    }
    let index = state.current_step;
    let step = catalog.step(index);
    if step.position.is_overlay() {
        return Some(TooltipLayout::Overlay {
            scroll: ScrollRequest {
                target: ScrollTarget::Tooltip,
                align: ScrollAlign::Center,
                smooth: true,
            },
        });
    }
    let target = if registry.get(index).is_some() {
        ScrollTarget::Element(index)
    } else {
        ScrollTarget::Tooltip
    };
    Some(TooltipLayout::Inline {
        order: inline_order(catalog, index),
        scroll: ScrollRequest {
            target,
            align: step.position.into(),
            smooth: false,
        },
    })
}

/// Top-left origin that centers a tooltip of `(width, height)` within a
/// viewport of `(viewport_width, viewport_height)`, in cells.
///
/// Oversized tooltips clamp to the origin rather than going negative.
#[must_use]
pub fn overlay_origin(
    viewport_width: u16,
    viewport_height: u16,
    width: u16,
    height: u16,
) -> (u16, u16) {
    (
        viewport_width.saturating_sub(width) / 2,
        viewport_height.saturating_sub(height) / 2,
    )
}
