#![forbid(unsafe_code)]

//! Ordered focus boundary with wrap-around at both ends.
//!
//! A [`TrapBoundary`] is the tab order of a blocking surface. It answers one
//! question: given the current focus owner and a Tab direction, does the
//! controller need to step in, and if so where does focus go?
//!
//! # Invariants
//!
//! - Members are unique and keep the order they were given in.
//! - Wrapping only happens at the two ends; inside the boundary the host's
//!   own tab order applies and [`TabOutcome::Default`] is returned.
//! - Focus outside the boundary is always pulled back in.

use ariactl_core::ElementRef;

/// What a Tab press inside a trap should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    /// Let the host's default tab order move focus.
    Default,
    /// Move focus to this element and suppress the default action.
    MoveTo(ElementRef),
    /// There is nothing to focus inside the trap; keep focus on the surface.
    Hold,
}

/// Ordered set of focusable elements focus may not leave.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrapBoundary {
    members: Vec<ElementRef>,
}

impl TrapBoundary {
    /// Build a boundary from elements in tab order. Duplicates are dropped.
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = ElementRef>) -> Self {
        let mut out: Vec<ElementRef> = Vec::new();
        for id in members {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        Self { members: out }
    }

    /// Members in tab order.
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[ElementRef] {
        &self.members
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<ElementRef> {
        self.members.first().copied()
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<ElementRef> {
        self.members.last().copied()
    }

    #[must_use]
    pub fn contains(&self, id: ElementRef) -> bool {
        self.members.contains(&id)
    }

    /// Forget every member.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Decide what a Tab press does given the current focus owner.
    #[must_use]
    pub fn on_tab(&self, current: Option<ElementRef>, backwards: bool) -> TabOutcome {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return TabOutcome::Hold;
        };

        let Some(current) = current.filter(|id| self.contains(*id)) else {
            return TabOutcome::MoveTo(if backwards { last } else { first });
        };

        if backwards && current == first {
            TabOutcome::MoveTo(last)
        } else if !backwards && current == last {
            TabOutcome::MoveTo(first)
        } else {
            TabOutcome::Default
        }
    }

    /// Where to send focus that landed on `target`, or `None` if it may stay.
    ///
    /// `surface` is always an allowed owner; it is where focus sits when the
    /// dialog has no focusable content.
    #[must_use]
    pub fn redirect(&self, target: ElementRef, surface: ElementRef) -> Option<ElementRef> {
        if target == surface || self.contains(target) {
            return None;
        }
        Some(self.first().unwrap_or(surface))
    }
}
