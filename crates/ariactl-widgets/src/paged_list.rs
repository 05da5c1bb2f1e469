#![forbid(unsafe_code)]

//! Paged item shelf: a fixed-size window sliding over an ordered sequence.
//!
//! [`PagedListController`] only moves on explicit [`go_next`] /
//! [`go_prev`] calls. After a page change it asks the host for a
//! paint-commit callback and, once the new window is on screen, moves focus
//! to the item at the edge the user moved toward: the first visible item
//! after "next", the last visible item after "previous".
//!
//! # Invariants
//!
//! 1. `0 <= start <= max(total - page_size, 0)` after every operation.
//! 2. At most one focus transfer is pending; a newer page change cancels the
//!    older ticket before requesting its own.
//! 3. Navigating at an edge is a no-op and schedules nothing.
//! 4. Dropping the controller cancels the pending ticket.
//!
//! [`go_next`]: PagedListController::go_next
//! [`go_prev`]: PagedListController::go_prev

use std::fmt;
use std::ops::Range;

use ariactl_core::{FocusSink, ItemElements, PagedListConfig, PaintCommitSignal, PaintTicket};
use tracing::{debug, trace, warn};

/// A window of `page_size` items starting at `start`, over `total` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    start: usize,
    page_size: usize,
    total: usize,
}

impl PageWindow {
    /// First page of `total` items. A zero page size is treated as one.
    #[must_use]
    pub fn new(page_size: usize, total: usize) -> Self {
        Self {
            start: 0,
            page_size: page_size.max(1),
            total,
        }
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// One past the last visible index.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        (self.start + self.page_size).min(self.total)
    }

    /// Largest start index a window may have.
    #[inline]
    #[must_use]
    pub fn max_start(&self) -> usize {
        self.total.saturating_sub(self.page_size)
    }

    #[inline]
    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.start > 0
    }

    #[inline]
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.end() < self.total
    }

    /// Start index "next" would move to.
    #[must_use]
    pub fn next_start(&self) -> usize {
        (self.start + self.page_size).min(self.max_start())
    }

    /// Start index "previous" would move to.
    #[must_use]
    pub fn prev_start(&self) -> usize {
        self.start.saturating_sub(self.page_size)
    }

    /// Visible index range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// 1-based page number of the current window.
    ///
    /// The last page may be a clamped, overlapping window; it still counts
    /// as the last page.
    #[must_use]
    pub fn page_number(&self) -> usize {
        if self.total == 0 {
            return 1;
        }
        if !self.can_go_next() {
            return self.page_count();
        }
        self.start / self.page_size + 1
    }

    /// Number of pages, at least one.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    fn clamp(&mut self) {
        self.start = self.start.min(self.max_start());
    }
}

/// Snapshot the host renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub start_index: usize,
    pub end_index: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

impl From<PageWindow> for PageState {
    fn from(w: PageWindow) -> Self {
        Self {
            start_index: w.start(),
            end_index: w.end(),
            can_go_prev: w.can_go_prev(),
            can_go_next: w.can_go_next(),
        }
    }
}

/// Which visible item receives focus once the new page is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEdge {
    FirstVisible,
    LastVisible,
}

#[derive(Debug, Clone, Copy)]
struct PendingFocus {
    ticket: PaintTicket,
    edge: FocusEdge,
}

/// Controller for a paged item shelf.
pub struct PagedListController<F, P>
where
    F: FocusSink + ItemElements,
    P: PaintCommitSignal,
{
    window: PageWindow,
    pending: Option<PendingFocus>,
    focus: F,
    paint: P,
}

impl<F, P> fmt::Debug for PagedListController<F, P>
where
    F: FocusSink + ItemElements,
    P: PaintCommitSignal,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedListController")
            .field("window", &self.window)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<F, P> PagedListController<F, P>
where
    F: FocusSink + ItemElements,
    P: PaintCommitSignal,
{
    /// Mount a shelf over `total` items, showing the first page.
    #[must_use]
    pub fn new(config: PagedListConfig, total: usize, focus: F, paint: P) -> Self {
        let window = PageWindow::new(config.effective_page_size(), total);
        debug!(
            page_size = window.page_size(),
            total, "paged list mounted"
        );
        Self {
            window,
            pending: None,
            focus,
            paint,
        }
    }

    /// Current render state.
    #[must_use]
    pub fn state(&self) -> PageState {
        self.window.into()
    }

    #[must_use]
    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Visible item indices.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.window.range()
    }

    /// Edge the next paint commit will focus, if a transfer is pending.
    #[must_use]
    pub fn pending_focus(&self) -> Option<FocusEdge> {
        self.pending.map(|p| p.edge)
    }

    /// Show the next page. Returns whether the window moved.
    pub fn go_next(&mut self) -> bool {
        let next = self.window.next_start();
        if next == self.window.start {
            trace!(start = next, "go_next at last page");
            return false;
        }
        self.move_to(next, FocusEdge::FirstVisible);
        true
    }

    /// Show the previous page. Returns whether the window moved.
    pub fn go_prev(&mut self) -> bool {
        let prev = self.window.prev_start();
        if prev == self.window.start {
            trace!(start = prev, "go_prev at first page");
            return false;
        }
        self.move_to(prev, FocusEdge::LastVisible);
        true
    }

    /// The host's item sequence changed length.
    ///
    /// The window is clamped; focus is not moved.
    pub fn set_total(&mut self, total: usize) {
        self.window.total = total;
        self.window.clamp();
        debug!(total, start = self.window.start, "paged list total changed");
    }

    /// Change the page size. Zero is treated as one.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.window.page_size = page_size.max(1);
        self.window.clamp();
        debug!(
            page_size = self.window.page_size,
            start = self.window.start,
            "paged list page size changed"
        );
    }

    /// The host committed a frame. Runs the pending focus transfer, if any.
    ///
    /// Returns whether focus moved.
    pub fn on_paint_commit(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let range = self.window.range();
        if range.is_empty() {
            trace!("paint commit with empty window, dropping focus transfer");
            return false;
        }
        let index = match pending.edge {
            FocusEdge::FirstVisible => range.start,
            FocusEdge::LastVisible => range.end - 1,
        };
        let Some(target) = self.focus.item_element(index) else {
            warn!(index, "no rendered element for item, focus not moved");
            return false;
        };
        match self.focus.focus(target) {
            Ok(()) => {
                debug!(index, %target, "focused edge item after page change");
                true
            }
            Err(err) => {
                warn!(index, %target, %err, "edge item focus failed");
                false
            }
        }
    }

    /// Tear down, cancelling any pending focus transfer.
    pub fn unmount(self) {}

    fn move_to(&mut self, start: usize, edge: FocusEdge) {
        let from = self.window.start;
        self.window.start = start;
        debug!(from, to = start, ?edge, "page changed");
        self.cancel_pending();
        let ticket = self.paint.request_commit();
        trace!(ticket = ticket.raw(), "requested paint commit");
        self.pending = Some(PendingFocus { ticket, edge });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!(ticket = pending.ticket.raw(), "cancelled paint commit");
            self.paint.cancel_commit(pending.ticket);
        }
    }
}

impl<F, P> Drop for PagedListController<F, P>
where
    F: FocusSink + ItemElements,
    P: PaintCommitSignal,
{
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
