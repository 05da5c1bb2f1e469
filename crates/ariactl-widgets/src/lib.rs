#![forbid(unsafe_code)]

//! Widget controllers: paged shelf, autoplaying carousel, modal dialog.
//!
//! # Role in ariactl
//! Each controller is a small state machine over the host capabilities from
//! `ariactl-core`. The host owns markup and style, feeds the controller
//! events (clicks, key presses, timer callbacks, paint commits, preference
//! changes), and renders from the controller's state snapshot.
//!
//! | Controller | Capabilities |
//! |---|---|
//! | [`PagedListController`] | `FocusSink` + `ItemElements`, `PaintCommitSignal` |
//! | [`CarouselController`] | `Timer`, initial `MediaQuerySignal` |
//! | [`ModalFocusController`] | `FocusSink` + `FocusQuery`, `InertToggle` |
//!
//! The controllers are independent of one another and assume a single
//! event loop: every method runs to completion before the next event.

pub mod carousel;
pub mod focus;
pub mod modal;
pub mod paged_list;

#[cfg(test)]
pub(crate) mod test_host;

pub use carousel::{CarouselController, CarouselState, LivePoliteness, PlayState};
pub use focus::{TabOutcome, TrapBoundary};
pub use modal::{CloseReason, DialogPhase, ModalFocusController};
pub use paged_list::{FocusEdge, PageState, PageWindow, PagedListController};
