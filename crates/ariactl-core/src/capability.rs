#![forbid(unsafe_code)]

//! Host capabilities consumed by the widget controllers.
//!
//! Each trait is the narrowest slice of host functionality one controller
//! needs. Controllers receive implementations at construction and keep them
//! for their whole lifetime; nothing is looked up globally.
//!
//! # Scheduling contract
//!
//! [`Timer`] and [`PaintCommitSignal`] hand out handles for single-shot
//! callbacks. The host delivers a callback by calling the owning
//! controller's entry point (`tick`, `on_paint_commit`). Once a handle is
//! cancelled the host must never deliver it. Controllers cancel before they
//! reschedule and before they are dropped, so a host honoring this contract
//! never calls into a torn-down controller.

use std::time::Duration;

use crate::element::ElementRef;
use crate::error::CapabilityError;

/// Moves input focus.
pub trait FocusSink {
    /// Move focus to `target`.
    ///
    /// Returns [`CapabilityError::StaleTarget`] if the element is missing or
    /// cannot take focus; focus is left where it was.
    fn focus(&mut self, target: ElementRef) -> Result<(), CapabilityError>;
}

/// Reads focus state and focusable structure.
pub trait FocusQuery {
    /// Element that currently owns focus, if any.
    fn currently_focused(&self) -> Option<ElementRef>;

    /// Whether `el` is still attached and able to take focus.
    fn is_focusable(&self, el: ElementRef) -> bool;

    /// Focusable descendants of `root` in tab order.
    fn focusable_within(&self, root: ElementRef) -> Vec<ElementRef>;
}

/// Marks an application root as non-interactive.
pub trait InertToggle {
    /// Set or clear inertness on `root`.
    ///
    /// Implementations must refuse the document root with
    /// [`CapabilityError::DocumentRoot`].
    fn set_inert(&mut self, root: ElementRef, inert: bool) -> Result<(), CapabilityError>;
}

/// Reports the reduced-motion accessibility preference.
///
/// Only the initial value is read through this trait; later changes are
/// delivered by the host calling the controller's change handler.
pub trait MediaQuerySignal {
    /// Whether the user currently prefers reduced motion.
    fn prefers_reduced_motion(&self) -> bool;
}

/// Handle to a scheduled timer callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Create a handle from a raw host identifier.
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

/// Single-shot timer scheduling.
pub trait Timer {
    /// Schedule one callback after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a pending callback. Cancelling a handle that already fired is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Handle to a pending paint-commit callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaintTicket(u64);

impl PaintTicket {
    /// Create a ticket from a raw host identifier.
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

/// Notifies once a state change has reached the rendered output.
pub trait PaintCommitSignal {
    /// Request one callback after the next paint commit.
    fn request_commit(&mut self) -> PaintTicket;

    /// Withdraw a pending request.
    fn cancel_commit(&mut self, ticket: PaintTicket);
}

/// Resolves item positions to the elements that render them.
pub trait ItemElements {
    /// Element rendering the item at `index`, if it is currently rendered.
    fn item_element(&self, index: usize) -> Option<ElementRef>;
}

impl<T: FocusSink + ?Sized> FocusSink for Box<T> {
    fn focus(&mut self, target: ElementRef) -> Result<(), CapabilityError> {
        (**self).focus(target)
    }
}

impl<T: Timer + ?Sized> Timer for Box<T> {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle);
    }
}

impl<T: PaintCommitSignal + ?Sized> PaintCommitSignal for Box<T> {
    fn request_commit(&mut self) -> PaintTicket {
        (**self).request_commit()
    }

    fn cancel_commit(&mut self, ticket: PaintTicket) {
        (**self).cancel_commit(ticket);
    }
}
