#![forbid(unsafe_code)]

//! Normalized key input.
//!
//! Hosts translate their native key events into [`KeyInput`] before handing
//! them to a controller. Only the keys the controllers react to have their
//! own [`KeyCode`] variant; everything else maps to [`KeyCode::Other`] and
//! is ignored.

use bitflags::bitflags;

/// Keys the controllers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Tab,
    /// Shift+Tab as reported by hosts that fold the modifier into the key.
    BackTab,
    Escape,
    Enter,
    Space,
    Left,
    Right,
    Home,
    End,
    Other,
}

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// Key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Add modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Tab, or Shift+Tab when `shift` is held.
    #[must_use]
    pub const fn tab(shift: bool) -> Self {
        if shift {
            Self::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT)
        } else {
            Self::new(KeyCode::Tab)
        }
    }

    /// If this is a Tab press, whether it moves backwards.
    ///
    /// Returns `None` for every other key.
    #[must_use]
    pub fn tab_direction(self) -> Option<bool> {
        match self.code {
            KeyCode::Tab => Some(self.modifiers.contains(Modifiers::SHIFT)),
            KeyCode::BackTab => Some(true),
            _ => None,
        }
    }

    /// Whether any of Ctrl, Alt or Meta is held.
    #[must_use]
    pub fn has_command_modifier(self) -> bool {
        self.modifiers
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
    }
}

impl From<KeyCode> for KeyInput {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}
