#![forbid(unsafe_code)]

//! Deterministic test harness for ariactl controllers.
//!
//! - [`SimHost`]: an in-memory element tree, focus, inert flags, a virtual
//!   clock and paint commits. One host value implements every capability
//!   trait, so clones of it can be handed to all controllers at once.
//! - [`Session`]: a reference page wiring a paged shelf, a carousel and a
//!   modal dialog to a single host.
//! - [`replay`]: JSONL scenario scripts driven against a [`Session`].
//!
//! Nothing here reads the wall clock; identical inputs produce identical
//! transcripts.

pub mod replay;
pub mod session;
pub mod sim_host;

pub use replay::{
    ReplayError, ReplayHeader, ReplayOp, StepSnapshot, Transcript, replay_path, replay_reader,
    replay_str,
};
pub use session::{PageLayout, Session, SessionOptions};
pub use sim_host::{DOCUMENT, HostEffect, SimHost};
