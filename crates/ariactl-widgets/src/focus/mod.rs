#![forbid(unsafe_code)]

//! Focus-trap primitives shared by the controllers.

pub mod trap;

pub use trap::{TabOutcome, TrapBoundary};
