#![forbid(unsafe_code)]

//! Deterministic in-memory host.
//!
//! [`SimHost`] stands in for the rendering layer: an element tree with
//! focus, inertness and attachment, a virtual clock driving single-shot
//! timers, a paint-commit queue, and the reduced-motion preference. It
//! implements every capability trait from `ariactl-core`, so one host can be
//! cloned into as many controllers as a test needs.
//!
//! # Invariants
//!
//! 1. Element `0` is the document root; it never takes focus and refuses
//!    inertness.
//! 2. An element is focusable only if it is marked focusable, attached, and
//!    neither it nor any ancestor is inert.
//! 3. Cancelled timers and paint tickets are never delivered.
//! 4. Timers fire in deadline order; ties fire in scheduling order.
//!
//! Every side effect is appended to an effect log for assertions.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;
use std::rc::Rc;
use std::time::Duration;

use ariactl_core::{
    CapabilityError, ElementRef, FocusQuery, FocusSink, InertToggle, ItemElements,
    MediaQuerySignal, PaintCommitSignal, PaintTicket, Timer, TimerHandle,
};
use tracing::trace;

/// The document root every [`SimHost`] starts with.
pub const DOCUMENT: ElementRef = ElementRef::new(0);

/// Side effect observed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEffect {
    Focused(ElementRef),
    FocusRefused(ElementRef),
    InertSet { root: ElementRef, inert: bool },
    InertRefused(ElementRef),
    TimerArmed { handle: TimerHandle, deadline: Duration },
    TimerCancelled(TimerHandle),
    TimerFired(TimerHandle),
    PaintRequested(PaintTicket),
    PaintCancelled(PaintTicket),
    PaintCommitted(PaintTicket),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementRef>,
    children: Vec<ElementRef>,
    focusable: bool,
    attached: bool,
    inert: bool,
}

impl Node {
    fn new(parent: Option<ElementRef>, focusable: bool) -> Self {
        Self {
            parent,
            children: Vec::new(),
            focusable,
            attached: true,
            inert: false,
        }
    }
}

#[derive(Debug)]
struct SimDom {
    nodes: BTreeMap<ElementRef, Node>,
    next_element: u64,
    focused: Option<ElementRef>,
    now: Duration,
    next_handle: u64,
    timers: BTreeMap<TimerHandle, Duration>,
    peak_timers: usize,
    paint: BTreeSet<PaintTicket>,
    items: BTreeMap<usize, ElementRef>,
    reduced_motion: bool,
    effects: Vec<HostEffect>,
}

impl SimDom {
    fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(DOCUMENT, Node::new(None, false));
        Self {
            nodes,
            next_element: 1,
            focused: None,
            now: Duration::ZERO,
            next_handle: 1,
            timers: BTreeMap::new(),
            peak_timers: 0,
            paint: BTreeSet::new(),
            items: BTreeMap::new(),
            reduced_motion: false,
            effects: Vec::new(),
        }
    }

    fn is_inert(&self, el: ElementRef) -> bool {
        let mut cursor = Some(el);
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get(&id) else {
                return false;
            };
            if node.inert {
                return true;
            }
            cursor = node.parent;
        }
        false
    }

    fn is_focusable(&self, el: ElementRef) -> bool {
        self.nodes
            .get(&el)
            .is_some_and(|n| n.focusable && n.attached)
            && !self.is_inert(el)
    }

    fn preorder(&self, root: ElementRef, out: &mut Vec<ElementRef>) {
        let Some(node) = self.nodes.get(&root) else {
            return;
        };
        for child in &node.children {
            out.push(*child);
            self.preorder(*child, out);
        }
    }

    fn focusable_within(&self, root: ElementRef) -> Vec<ElementRef> {
        let mut all = Vec::new();
        self.preorder(root, &mut all);
        all.retain(|id| self.is_focusable(*id));
        all
    }

    fn detach(&mut self, el: ElementRef) {
        let mut subtree = vec![el];
        self.preorder(el, &mut subtree);
        for id in &subtree {
            if let Some(node) = self.nodes.get_mut(id) {
                node.attached = false;
            }
        }
        if let Some(parent) = self.nodes.get(&el).and_then(|n| n.parent)
            && let Some(p) = self.nodes.get_mut(&parent)
        {
            p.children.retain(|c| *c != el);
        }
        if self.focused.is_some_and(|f| subtree.contains(&f)) {
            self.focused = None;
        }
        self.items.retain(|_, item| !subtree.contains(item));
    }

    fn next_handle(&mut self) -> u64 {
        let raw = self.next_handle;
        self.next_handle += 1;
        raw
    }
}

/// Cloneable handle to a simulated host.
#[derive(Debug, Clone)]
pub struct SimHost {
    dom: Rc<RefCell<SimDom>>,
}

impl Default for SimHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimHost {
    /// Create a host containing only the document root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dom: Rc::new(RefCell::new(SimDom::new())),
        }
    }

    /// Set the initial reduced-motion preference.
    #[must_use]
    pub fn with_reduced_motion(self, on: bool) -> Self {
        self.dom.borrow_mut().reduced_motion = on;
        self
    }

    /// Append an element under `parent`.
    pub fn add(&self, parent: ElementRef, focusable: bool) -> ElementRef {
        let mut dom = self.dom.borrow_mut();
        let id = ElementRef::new(dom.next_element);
        dom.next_element += 1;
        dom.nodes.insert(id, Node::new(Some(parent), focusable));
        if let Some(p) = dom.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        id
    }

    /// Append `n` focusable children under `parent`.
    pub fn add_focusable(&self, parent: ElementRef, n: usize) -> Vec<ElementRef> {
        (0..n).map(|_| self.add(parent, true)).collect()
    }

    /// Remove an element and its subtree from the rendered output.
    pub fn detach(&self, el: ElementRef) {
        self.dom.borrow_mut().detach(el);
    }

    #[must_use]
    pub fn is_attached(&self, el: ElementRef) -> bool {
        self.dom.borrow().nodes.get(&el).is_some_and(|n| n.attached)
    }

    /// Whether `el` or any ancestor is inert.
    #[must_use]
    pub fn is_inert(&self, el: ElementRef) -> bool {
        self.dom.borrow().is_inert(el)
    }

    /// Current focus owner.
    #[must_use]
    pub fn focused(&self) -> Option<ElementRef> {
        self.dom.borrow().focused
    }

    /// User moves focus directly (click or programmatic host focus).
    pub fn click_focus(&self, el: ElementRef) -> bool {
        self.try_focus(el).is_ok()
    }

    /// Host default tab movement over every focusable element in document order.
    pub fn default_tab(&self, backwards: bool) -> Option<ElementRef> {
        let order = self.dom.borrow().focusable_within(DOCUMENT);
        if order.is_empty() {
            return None;
        }
        let current = self.focused();
        let pos = current.and_then(|c| order.iter().position(|id| *id == c));
        let next = match (pos, backwards) {
            (None, false) => order[0],
            (None, true) => order[order.len() - 1],
            (Some(i), false) => order[(i + 1) % order.len()],
            (Some(i), true) => order[(i + order.len() - 1) % order.len()],
        };
        self.dom.borrow_mut().focused = Some(next);
        Some(next)
    }

    /// Change the reduced-motion preference. The caller forwards the change.
    pub fn set_reduced_motion(&self, on: bool) {
        self.dom.borrow_mut().reduced_motion = on;
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.dom.borrow().now
    }

    /// Number of timers currently armed.
    #[must_use]
    pub fn live_timers(&self) -> usize {
        self.dom.borrow().timers.len()
    }

    /// Highest number of simultaneously armed timers seen so far.
    #[must_use]
    pub fn peak_live_timers(&self) -> usize {
        self.dom.borrow().peak_timers
    }

    /// Advance the clock by `by`, delivering every timer that comes due.
    ///
    /// `on_fire` runs with the host unborrowed, so it may call back into a
    /// controller that schedules new timers; those fire too if they fall
    /// inside the window. Returns the handles delivered, in order.
    pub fn advance(&self, by: Duration, mut on_fire: impl FnMut(TimerHandle)) -> Vec<TimerHandle> {
        let end = self.now() + by;
        let mut fired = Vec::new();
        loop {
            let due = {
                let dom = self.dom.borrow();
                dom.timers
                    .iter()
                    .filter(|(_, deadline)| **deadline <= end)
                    .min_by_key(|(handle, deadline)| (**deadline, **handle))
                    .map(|(handle, deadline)| (*handle, *deadline))
            };
            let Some((handle, deadline)) = due else {
                break;
            };
            {
                let mut dom = self.dom.borrow_mut();
                dom.now = deadline;
                dom.timers.remove(&handle);
                dom.effects.push(HostEffect::TimerFired(handle));
            }
            trace!(handle = handle.raw(), at_ms = deadline.as_millis() as u64, "timer fired");
            fired.push(handle);
            on_fire(handle);
        }
        self.dom.borrow_mut().now = end;
        fired
    }

    /// Number of paint-commit callbacks waiting.
    #[must_use]
    pub fn pending_paints(&self) -> usize {
        self.dom.borrow().paint.len()
    }

    /// Commit a frame, consuming every pending paint ticket.
    pub fn commit_paint(&self) -> Vec<PaintTicket> {
        let mut dom = self.dom.borrow_mut();
        let tickets: Vec<PaintTicket> = std::mem::take(&mut dom.paint).into_iter().collect();
        for t in &tickets {
            dom.effects.push(HostEffect::PaintCommitted(*t));
        }
        tickets
    }

    /// Render item indices `range` as fresh focusable children of `list`.
    ///
    /// Elements from the previous render are detached first.
    pub fn render_items(&self, list: ElementRef, range: Range<usize>) -> Vec<ElementRef> {
        let previous: Vec<ElementRef> = self.dom.borrow().items.values().copied().collect();
        for el in previous {
            self.detach(el);
        }
        let mut out = Vec::with_capacity(range.len());
        for index in range {
            let el = self.add(list, true);
            self.dom.borrow_mut().items.insert(index, el);
            out.push(el);
        }
        out
    }

    /// Snapshot of the effect log.
    #[must_use]
    pub fn effects(&self) -> Vec<HostEffect> {
        self.dom.borrow().effects.clone()
    }

    /// Clear the effect log.
    pub fn clear_effects(&self) {
        self.dom.borrow_mut().effects.clear();
    }
}

impl FocusSink for SimHost {
    fn focus(&mut self, target: ElementRef) -> Result<(), CapabilityError> {
        self.try_focus(target)
    }
}

impl SimHost {
    fn try_focus(&self, target: ElementRef) -> Result<(), CapabilityError> {
        let mut dom = self.dom.borrow_mut();
        if !dom.is_focusable(target) {
            dom.effects.push(HostEffect::FocusRefused(target));
            return Err(CapabilityError::StaleTarget(target));
        }
        dom.focused = Some(target);
        dom.effects.push(HostEffect::Focused(target));
        Ok(())
    }
}

impl FocusQuery for SimHost {
    fn currently_focused(&self) -> Option<ElementRef> {
        self.dom.borrow().focused
    }

    fn is_focusable(&self, el: ElementRef) -> bool {
        self.dom.borrow().is_focusable(el)
    }

    fn focusable_within(&self, root: ElementRef) -> Vec<ElementRef> {
        self.dom.borrow().focusable_within(root)
    }
}

impl InertToggle for SimHost {
    fn set_inert(&mut self, root: ElementRef, inert: bool) -> Result<(), CapabilityError> {
        let mut dom = self.dom.borrow_mut();
        if root == DOCUMENT {
            dom.effects.push(HostEffect::InertRefused(root));
            return Err(CapabilityError::DocumentRoot);
        }
        if !dom.nodes.get(&root).is_some_and(|n| n.attached) {
            dom.effects.push(HostEffect::InertRefused(root));
            return Err(CapabilityError::MissingRoot(root));
        }
        if let Some(node) = dom.nodes.get_mut(&root) {
            node.inert = inert;
        }
        dom.effects.push(HostEffect::InertSet { root, inert });
        if inert
            && let Some(focused) = dom.focused
            && dom.is_inert(focused)
        {
            dom.focused = None;
        }
        Ok(())
    }
}

impl MediaQuerySignal for SimHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.dom.borrow().reduced_motion
    }
}

impl Timer for SimHost {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let mut dom = self.dom.borrow_mut();
        let handle = TimerHandle::new(dom.next_handle());
        let deadline = dom.now + delay;
        dom.timers.insert(handle, deadline);
        dom.peak_timers = dom.peak_timers.max(dom.timers.len());
        dom.effects.push(HostEffect::TimerArmed { handle, deadline });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let mut dom = self.dom.borrow_mut();
        if dom.timers.remove(&handle).is_some() {
            dom.effects.push(HostEffect::TimerCancelled(handle));
        }
    }
}

impl PaintCommitSignal for SimHost {
    fn request_commit(&mut self) -> PaintTicket {
        let mut dom = self.dom.borrow_mut();
        let ticket = PaintTicket::new(dom.next_handle());
        dom.paint.insert(ticket);
        dom.effects.push(HostEffect::PaintRequested(ticket));
        ticket
    }

    fn cancel_commit(&mut self, ticket: PaintTicket) {
        let mut dom = self.dom.borrow_mut();
        if dom.paint.remove(&ticket) {
            dom.effects.push(HostEffect::PaintCancelled(ticket));
        }
    }
}

impl ItemElements for SimHost {
    fn item_element(&self, index: usize) -> Option<ElementRef> {
        self.dom.borrow().items.get(&index).copied()
    }
}
