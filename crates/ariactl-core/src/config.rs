#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! All configs follow the same shape: a `Default` (or a constructor taking
//! the required element references) plus `#[must_use]` builder methods.
//! With the `serde` feature they round-trip through any serde format, which
//! the harness uses to read scenario headers.

use std::time::Duration;

use crate::element::ElementRef;
use crate::error::ConfigError;

/// Default number of items visible per shelf page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Default carousel auto-advance interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 5000;

/// Paged shelf configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PagedListConfig {
    /// Items per page. Zero is treated as one.
    pub page_size: usize,
}

impl Default for PagedListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PagedListConfig {
    /// Set the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Page size with the zero case normalized away.
    #[inline]
    #[must_use]
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

/// Carousel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Auto-advance interval in milliseconds.
    pub interval_ms: u64,
    /// Whether the carousel rotates on its own at all.
    pub autoplay: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            autoplay: true,
        }
    }
}

impl CarouselConfig {
    /// Set the auto-advance interval.
    #[must_use]
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Enable or disable autoplay.
    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Interval as a [`Duration`].
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Where focus goes when a dialog opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InitialFocus {
    /// The dialog surface itself.
    Surface,
    /// The first focusable descendant, or the surface when there is none.
    #[default]
    FirstFocusable,
}

/// Modal dialog configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogConfig {
    /// The dialog surface; its focusable descendants form the trap.
    pub surface: ElementRef,
    /// Application root made inert while the dialog is open.
    pub inert_root: ElementRef,
    /// Where focus goes on close if the opener is gone.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fallback_focus: Option<ElementRef>,
    /// Whether activating the backdrop closes the dialog.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub dismiss_on_backdrop: bool,
    /// Whether Escape closes the dialog.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub close_on_escape: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_focus: InitialFocus,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl DialogConfig {
    /// Create a config for `surface`, inerting `inert_root` while open.
    #[must_use]
    pub fn new(surface: ElementRef, inert_root: ElementRef) -> Self {
        Self {
            surface,
            inert_root,
            fallback_focus: None,
            dismiss_on_backdrop: true,
            close_on_escape: true,
            initial_focus: InitialFocus::FirstFocusable,
        }
    }

    /// Set the fallback focus target used when the opener is gone.
    #[must_use]
    pub fn with_fallback_focus(mut self, target: ElementRef) -> Self {
        self.fallback_focus = Some(target);
        self
    }

    /// Enable or disable backdrop dismissal.
    #[must_use]
    pub fn with_dismiss_on_backdrop(mut self, dismiss: bool) -> Self {
        self.dismiss_on_backdrop = dismiss;
        self
    }

    /// Enable or disable Escape-to-close.
    #[must_use]
    pub fn with_close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Set the initial focus policy.
    #[must_use]
    pub fn with_initial_focus(mut self, initial: InitialFocus) -> Self {
        self.initial_focus = initial;
        self
    }

    /// Check the element wiring.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inert_root == self.surface {
            return Err(ConfigError::InertRootIsSurface(self.surface));
        }
        if self.fallback_focus == Some(self.surface) {
            return Err(ConfigError::FallbackIsSurface(self.surface));
        }
        Ok(())
    }
}
