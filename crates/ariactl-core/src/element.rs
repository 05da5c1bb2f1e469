#![forbid(unsafe_code)]

//! Opaque element references.
//!
//! An [`ElementRef`] names an element owned by the host rendering layer. It
//! behaves like a weak reference: holding one never keeps the element alive,
//! and the host decides whether it is still attached and focusable when the
//! reference is used.

use std::fmt;

/// Weak, copyable handle to a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementRef(u64);

impl ElementRef {
    /// Create a reference from a raw host identifier.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw host identifier.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementRef {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
