#![forbid(unsafe_code)]

//! Focus lifecycle of a blocking dialog.
//!
//! [`ModalFocusController`] owns everything that has to happen around a
//! modal dialog for keyboard and assistive-technology users:
//!
//! - On open: remember the element that had focus (the opener), build the
//!   focus trap from the surface's focusable descendants, mark the
//!   application root inert, and move focus into the dialog.
//! - While open: wrap Tab/Shift+Tab at the trap's ends, pull stray focus
//!   back in, close on Escape and (optionally) on backdrop activation.
//! - On close: lift inertness, then restore focus to the opener or, if the
//!   opener is gone, to the configured fallback.
//!
//! # Invariants
//!
//! 1. The opener is captured exactly once per open/close cycle, at the
//!    moment of opening; a repeated `open()` never recaptures it.
//! 2. The opener is consumed exactly once, at close.
//! 3. Inertness is only ever applied to the configured application root,
//!    and is lifted before focus is restored.
//! 4. The trap is empty whenever the dialog is closed.
//!
//! # Failure Modes
//!
//! - A stale focus target, a missing inert root, or a missing fallback are
//!   logged and skipped; the open/close transition still completes.
//! - Dropping an open controller closes it, so the application root never
//!   stays inert after the dialog is gone.

use std::fmt;

use ariactl_core::{
    ConfigError, DialogConfig, ElementRef, FocusQuery, FocusSink, InertToggle, InitialFocus,
    KeyCode, KeyInput,
};
use tracing::{debug, warn};

use crate::focus::{TabOutcome, TrapBoundary};

/// Dialog lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Closed,
    Open,
}

/// Why the dialog last closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Escape,
    Backdrop,
    Programmatic,
}

/// Controller for a blocking modal dialog.
pub struct ModalFocusController<F, I>
where
    F: FocusSink + FocusQuery,
    I: InertToggle,
{
    config: DialogConfig,
    phase: DialogPhase,
    captured_opener: Option<ElementRef>,
    boundary: TrapBoundary,
    inert_applied: bool,
    last_close: Option<CloseReason>,
    focus: F,
    inert: I,
}

impl<F, I> fmt::Debug for ModalFocusController<F, I>
where
    F: FocusSink + FocusQuery,
    I: InertToggle,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalFocusController")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("captured_opener", &self.captured_opener)
            .field("boundary", &self.boundary)
            .field("inert_applied", &self.inert_applied)
            .field("last_close", &self.last_close)
            .finish_non_exhaustive()
    }
}

impl<F, I> ModalFocusController<F, I>
where
    F: FocusSink + FocusQuery,
    I: InertToggle,
{
    /// Create a closed dialog controller.
    pub fn new(config: DialogConfig, focus: F, inert: I) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            phase: DialogPhase::Closed,
            captured_opener: None,
            boundary: TrapBoundary::default(),
            inert_applied: false,
            last_close: None,
            focus,
            inert,
        })
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == DialogPhase::Open
    }

    #[must_use]
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Current trap members in tab order. Empty while closed.
    #[must_use]
    pub fn boundary(&self) -> &TrapBoundary {
        &self.boundary
    }

    /// Element focus returns to on close.
    #[must_use]
    pub fn captured_opener(&self) -> Option<ElementRef> {
        self.captured_opener
    }

    #[must_use]
    pub fn last_close_reason(&self) -> Option<CloseReason> {
        self.last_close
    }

    /// Open the dialog. Returns `false` if it was already open.
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            debug!(surface = %self.config.surface, "open ignored, dialog already open");
            return false;
        }

        self.captured_opener = self.focus.currently_focused();
        self.boundary = TrapBoundary::new(self.focus.focusable_within(self.config.surface));
        self.apply_inert(true);
        self.phase = DialogPhase::Open;
        self.last_close = None;
        debug!(
            surface = %self.config.surface,
            opener = ?self.captured_opener,
            trap_len = self.boundary.len(),
            "dialog opened"
        );

        let target = match self.config.initial_focus {
            InitialFocus::Surface => self.config.surface,
            InitialFocus::FirstFocusable => self.boundary.first().unwrap_or(self.config.surface),
        };
        if !self.move_focus(target) && target != self.config.surface {
            self.move_focus(self.config.surface);
        }
        true
    }

    /// Close the dialog. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        self.close_with(CloseReason::Programmatic)
    }

    /// Escape pressed. Returns whether the dialog closed.
    pub fn on_escape(&mut self) -> bool {
        if !self.is_open() || !self.config.close_on_escape {
            return false;
        }
        self.close_with(CloseReason::Escape)
    }

    /// Backdrop clicked or tapped. Returns whether the dialog closed.
    pub fn on_backdrop_activate(&mut self) -> bool {
        if !self.is_open() || !self.config.dismiss_on_backdrop {
            return false;
        }
        self.close_with(CloseReason::Backdrop)
    }

    /// Tab pressed while open.
    ///
    /// Returns `true` when the controller moved focus itself and the host
    /// must suppress its default tab handling. A wrap target that refuses
    /// focus sends focus to the surface instead.
    pub fn on_tab_key(&mut self, shift_held: bool) -> bool {
        if !self.is_open() {
            return false;
        }
        let current = self.focus.currently_focused();
        match self.boundary.on_tab(current, shift_held) {
            TabOutcome::Default => false,
            TabOutcome::MoveTo(target) => {
                self.move_focus(target) || self.move_focus(self.config.surface)
            }
            TabOutcome::Hold => {
                if current != Some(self.config.surface) {
                    self.move_focus(self.config.surface);
                }
                true
            }
        }
    }

    /// Focus landed on `target` while open. Pulls it back inside if needed.
    ///
    /// Returns whether focus was redirected.
    pub fn on_focus_in(&mut self, target: ElementRef) -> bool {
        if !self.is_open() {
            return false;
        }
        let Some(to) = self.boundary.redirect(target, self.config.surface) else {
            return false;
        };
        debug!(%target, %to, "focus escaped dialog, pulling back");
        self.move_focus(to);
        true
    }

    /// Dispatch a key press. Returns whether it was consumed.
    pub fn handle_key(&mut self, key: KeyInput) -> bool {
        if key.code == KeyCode::Escape {
            return self.on_escape();
        }
        match key.tab_direction() {
            Some(backwards) => self.on_tab_key(backwards),
            None => false,
        }
    }

    /// Recompute the trap after the dialog's content changed.
    pub fn refresh_boundary(&mut self) {
        if !self.is_open() {
            return;
        }
        self.boundary = TrapBoundary::new(self.focus.focusable_within(self.config.surface));
        debug!(trap_len = self.boundary.len(), "dialog trap refreshed");
        match self.focus.currently_focused() {
            Some(current) => {
                self.on_focus_in(current);
            }
            None => {
                let target = self.boundary.first().unwrap_or(self.config.surface);
                self.move_focus(target);
            }
        }
    }

    fn close_with(&mut self, reason: CloseReason) -> bool {
        if !self.is_open() {
            debug!(surface = %self.config.surface, "close ignored, dialog not open");
            return false;
        }
        self.phase = DialogPhase::Closed;
        self.apply_inert(false);
        self.boundary.clear();
        self.last_close = Some(reason);
        debug!(surface = %self.config.surface, ?reason, "dialog closed");
        self.restore_focus();
        true
    }

    fn restore_focus(&mut self) {
        let opener = self.captured_opener.take();
        if let Some(opener) = opener
            && self.focus.is_focusable(opener)
            && self.move_focus(opener)
        {
            return;
        }
        match self.config.fallback_focus {
            Some(fallback) => {
                debug!(?opener, %fallback, "opener gone, restoring focus to fallback");
                self.move_focus(fallback);
            }
            None => warn!(?opener, "opener gone and no fallback configured, focus not restored"),
        }
    }

    fn apply_inert(&mut self, inert: bool) {
        if inert == self.inert_applied {
            return;
        }
        match self.inert.set_inert(self.config.inert_root, inert) {
            Ok(()) => self.inert_applied = inert,
            Err(err) => warn!(root = %self.config.inert_root, inert, %err, "inert toggle skipped"),
        }
    }

    fn move_focus(&mut self, target: ElementRef) -> bool {
        match self.focus.focus(target) {
            Ok(()) => true,
            Err(err) => {
                warn!(%target, %err, "focus move skipped");
                false
            }
        }
    }
}

impl<F, I> Drop for ModalFocusController<F, I>
where
    F: FocusSink + FocusQuery,
    I: InertToggle,
{
    fn drop(&mut self) {
        if self.is_open() {
            self.close_with(CloseReason::Programmatic);
        }
    }
}
