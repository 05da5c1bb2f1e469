#![forbid(unsafe_code)]

//! Core: element references, host capabilities, key input, and configuration.
//!
//! # Role in ariactl
//! `ariactl-core` is the boundary between widget controllers and whatever
//! host renders them. Controllers never touch a document, a clock, or a
//! media query directly; they are handed capability objects implementing
//! the traits in [`capability`] and talk to the host only through those.
//!
//! # Primary responsibilities
//! - **ElementRef**: opaque, copyable handle to a host element. Staleness is
//!   resolved by the host, never by the controller.
//! - **Capabilities**: focus, inertness, timers, paint commits, and the
//!   reduced-motion preference.
//! - **KeyInput**: normalized key presses the controllers understand.
//! - **Config**: per-widget configuration with optional serde support.
//!
//! # How it fits in the system
//! `ariactl-widgets` builds the three controllers on top of these traits,
//! and `ariactl-harness` provides a deterministic in-memory host that
//! implements all of them for tests and scripted replays.

pub mod capability;
pub mod config;
pub mod element;
pub mod error;
pub mod input;

pub use capability::{
    FocusQuery, FocusSink, InertToggle, ItemElements, MediaQuerySignal, PaintCommitSignal,
    PaintTicket, Timer, TimerHandle,
};
pub use config::{CarouselConfig, DialogConfig, InitialFocus, PagedListConfig};
pub use element::ElementRef;
pub use error::{CapabilityError, ConfigError};
pub use input::{KeyCode, KeyInput, Modifiers};
