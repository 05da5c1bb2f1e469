#![forbid(unsafe_code)]

//! Blocking modal surfaces.

pub mod dialog;

pub use dialog::{CloseReason, DialogPhase, ModalFocusController};
