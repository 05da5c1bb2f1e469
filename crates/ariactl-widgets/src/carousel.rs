#![forbid(unsafe_code)]

//! Autoplaying carousel over a fixed set of slides.
//!
//! # State machine
//!
//! ```text
//!            toggle_play (clears motion suppression)
//!     ┌──────────────────────────────────────────────┐
//!     │                                              ▼
//!  Paused ◄── go_to / go_prev / go_next ──────── Playing ──┐
//!     ▲   ◄── pause / on_focus_enter                 │     │ tick: advance,
//!     │   ◄── on_reduced_motion_change(true)         │     │ re-arm
//!     └──────────────── toggle_play ─────────────────┘ ◄───┘
//! ```
//!
//! # Invariants
//!
//! 1. A timer is armed **iff** the carousel is playing, autoplay is enabled,
//!    motion is not suppressed, the interval is non-zero, and there is at
//!    least one slide.
//! 2. At most one timer is armed. Every change to an input of (1) goes
//!    through [`reconcile`](CarouselController::reconcile), which cancels the
//!    armed timer before it arms a replacement.
//! 3. `active_index < count` whenever `count > 0`; it is `0` otherwise.
//! 4. Dropping the controller cancels the armed timer.
//!
//! # Reduced motion
//!
//! The host preference and the suppression derived from it are tracked
//! separately. A preference turning on pauses and suppresses rotation. It
//! turning off again only records the preference: rotation stays stopped
//! until the user explicitly presses Play, which also lifts suppression.
//!
//! # Focus and the play/pause control
//!
//! Keyboard focus entering the region pauses rotation. A pointer press on
//! the play/pause control also moves focus into the region, right before the
//! click toggles playback; the host reports the press through
//! [`on_toggle_pointer_down`](CarouselController::on_toggle_pointer_down) so
//! that the focus it causes does not pause the carousel first.

use std::fmt;
use std::time::Duration;

use ariactl_core::{CarouselConfig, KeyCode, KeyInput, MediaQuerySignal, Timer, TimerHandle};
use tracing::{debug, trace};

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

/// Politeness of the slide live region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivePoliteness {
    /// Slide changes are not announced (rotation in progress).
    Off,
    /// Slide changes are announced when the user navigates.
    Polite,
}

impl LivePoliteness {
    /// Value for an `aria-live` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
        }
    }
}

/// Snapshot the host renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub active_index: usize,
    pub count: usize,
    pub playing: bool,
    pub live: LivePoliteness,
}

/// Controller for an autoplaying carousel.
pub struct CarouselController<T: Timer> {
    active: usize,
    count: usize,
    play: PlayState,
    autoplay: bool,
    interval: Duration,
    prefers_reduced_motion: bool,
    motion_suppressed: bool,
    toggle_pointer_pending: bool,
    timer: Option<TimerHandle>,
    clock: T,
}

impl<T: Timer> fmt::Debug for CarouselController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselController")
            .field("active", &self.active)
            .field("count", &self.count)
            .field("play", &self.play)
            .field("autoplay", &self.autoplay)
            .field("interval", &self.interval)
            .field("prefers_reduced_motion", &self.prefers_reduced_motion)
            .field("motion_suppressed", &self.motion_suppressed)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl<T: Timer> CarouselController<T> {
    /// Mount a carousel with `count` slides.
    ///
    /// Starts paused when `media` reports the reduced-motion preference or
    /// autoplay is disabled; otherwise starts playing with one timer armed.
    #[must_use]
    pub fn new(
        config: CarouselConfig,
        count: usize,
        media: &impl MediaQuerySignal,
        clock: T,
    ) -> Self {
        let reduced = media.prefers_reduced_motion();
        let play = if config.autoplay && !reduced {
            PlayState::Playing
        } else {
            PlayState::Paused
        };
        let mut ctl = Self {
            active: 0,
            count,
            play,
            autoplay: config.autoplay,
            interval: config.interval(),
            prefers_reduced_motion: reduced,
            motion_suppressed: reduced,
            toggle_pointer_pending: false,
            timer: None,
            clock,
        };
        debug!(
            count,
            ?play,
            reduced_motion = reduced,
            interval_ms = config.interval_ms,
            "carousel mounted"
        );
        ctl.reconcile();
        ctl
    }

    /// Current render state.
    #[must_use]
    pub fn state(&self) -> CarouselState {
        CarouselState {
            active_index: self.active,
            count: self.count,
            playing: self.is_playing(),
            live: self.live_region(),
        }
    }

    #[inline]
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    #[inline]
    #[must_use]
    pub fn play_state(&self) -> PlayState {
        self.play
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.play == PlayState::Playing
    }

    /// Whether a timer is currently armed.
    #[inline]
    #[must_use]
    pub fn is_rotating(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether rotation is held back by the reduced-motion preference.
    #[inline]
    #[must_use]
    pub fn motion_suppressed(&self) -> bool {
        self.motion_suppressed
    }

    /// Live region politeness for slide announcements.
    #[must_use]
    pub fn live_region(&self) -> LivePoliteness {
        match self.play {
            PlayState::Playing => LivePoliteness::Off,
            PlayState::Paused => LivePoliteness::Polite,
        }
    }

    /// 1-based slide position and slide count, for "slide X of Y" labels.
    #[must_use]
    pub fn slide_position(&self) -> (usize, usize) {
        if self.count == 0 {
            (0, 0)
        } else {
            (self.active + 1, self.count)
        }
    }

    /// The armed timer fired: advance one slide and re-arm.
    ///
    /// A tick with no timer armed is ignored.
    pub fn tick(&mut self) {
        let spent = self.timer.take();
        if spent.is_none() || self.play != PlayState::Playing || self.count == 0 {
            trace!(armed = spent.is_some(), play = ?self.play, count = self.count, "tick ignored");
            return;
        }
        let from = self.active;
        self.active = (self.active + 1) % self.count;
        trace!(from, to = self.active, "auto-advanced");
        self.reconcile();
    }

    /// Jump to a slide. Out-of-range and negative indices wrap. Pauses.
    pub fn go_to(&mut self, index: isize) {
        if self.count == 0 {
            return;
        }
        let count = self.count as isize;
        self.navigate(index.rem_euclid(count) as usize);
    }

    /// Next slide, wrapping. Pauses.
    pub fn go_next(&mut self) {
        if self.count == 0 {
            return;
        }
        self.navigate((self.active + 1) % self.count);
    }

    /// Previous slide, wrapping. Pauses.
    pub fn go_prev(&mut self) {
        if self.count == 0 {
            return;
        }
        self.navigate((self.active + self.count - 1) % self.count);
    }

    /// Stop rotation (pointer hover, host request).
    pub fn pause(&mut self) {
        self.set_play(PlayState::Paused, "pause");
    }

    /// Flip between playing and paused.
    ///
    /// Pressing Play is an explicit user override: it lifts reduced-motion
    /// suppression until the preference next reports a change.
    pub fn toggle_play(&mut self) {
        self.toggle_pointer_pending = false;
        match self.play {
            PlayState::Playing => self.set_play(PlayState::Paused, "toggle"),
            PlayState::Paused => {
                if self.motion_suppressed {
                    debug!("user play overrides reduced motion");
                    self.motion_suppressed = false;
                }
                self.set_play(PlayState::Playing, "toggle");
            }
        }
    }

    /// A pointer press landed on the play/pause control.
    ///
    /// The focus-enter this press causes will not pause the carousel.
    pub fn on_toggle_pointer_down(&mut self) {
        self.toggle_pointer_pending = true;
    }

    /// Focus entered the carousel region.
    pub fn on_focus_enter(&mut self) {
        if std::mem::take(&mut self.toggle_pointer_pending) {
            trace!("focus from play/pause pointer press, not pausing");
            return;
        }
        self.set_play(PlayState::Paused, "focus");
    }

    /// Focus left the carousel region. Rotation does not resume.
    pub fn on_focus_leave(&mut self) {
        self.toggle_pointer_pending = false;
    }

    /// The host's reduced-motion preference changed.
    pub fn on_reduced_motion_change(&mut self, prefers_reduced: bool) {
        if self.prefers_reduced_motion == prefers_reduced {
            return;
        }
        self.prefers_reduced_motion = prefers_reduced;
        debug!(prefers_reduced, "reduced motion preference changed");
        if prefers_reduced {
            self.motion_suppressed = true;
            self.play = PlayState::Paused;
            self.reconcile();
        }
    }

    /// Handle a key press while focus is inside the carousel.
    ///
    /// Left/Right step one slide, Home/End jump to the ends. Returns whether
    /// the key was consumed.
    pub fn handle_key(&mut self, key: KeyInput) -> bool {
        if key.has_command_modifier() || self.count == 0 {
            return false;
        }
        match key.code {
            KeyCode::Left => self.go_prev(),
            KeyCode::Right => self.go_next(),
            KeyCode::Home => self.navigate(0),
            KeyCode::End => self.navigate(self.count - 1),
            _ => return false,
        }
        true
    }

    /// The number of slides changed.
    pub fn set_count(&mut self, count: usize) {
        if self.count == count {
            return;
        }
        self.count = count;
        self.active = if count == 0 {
            0
        } else {
            self.active.min(count - 1)
        };
        debug!(count, active = self.active, "carousel count changed");
        self.reconcile();
    }

    /// Change the auto-advance interval. Zero disables rotation.
    pub fn set_interval(&mut self, interval: Duration) {
        if self.interval == interval {
            return;
        }
        self.interval = interval;
        debug!(interval_ms = interval.as_millis() as u64, "carousel interval changed");
        self.reconcile();
    }

    /// Enable or disable autoplay.
    pub fn set_autoplay_enabled(&mut self, enabled: bool) {
        if self.autoplay == enabled {
            return;
        }
        self.autoplay = enabled;
        debug!(enabled, "carousel autoplay changed");
        self.reconcile();
    }

    /// Tear down, cancelling the armed timer.
    pub fn unmount(self) {}

    fn navigate(&mut self, index: usize) {
        if index != self.active {
            debug!(from = self.active, to = index, "slide changed");
        }
        self.active = index;
        self.set_play(PlayState::Paused, "navigate");
    }

    fn set_play(&mut self, play: PlayState, cause: &'static str) {
        if self.play == play {
            return;
        }
        debug!(from = ?self.play, to = ?play, cause, "play state changed");
        self.play = play;
        self.reconcile();
    }

    fn should_rotate(&self) -> bool {
        self.play == PlayState::Playing
            && self.autoplay
            && !self.motion_suppressed
            && !self.interval.is_zero()
            && self.count > 0
    }

    /// Cancel the armed timer, then arm exactly one if rotation should run.
    fn reconcile(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.clock.cancel(handle);
            trace!(handle = handle.raw(), "timer cancelled");
        }
        if self.should_rotate() {
            let handle = self.clock.schedule(self.interval);
            trace!(handle = handle.raw(), "timer armed");
            self.timer = Some(handle);
        }
    }
}

impl<T: Timer> Drop for CarouselController<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.clock.cancel(handle);
        }
    }
}
