#![forbid(unsafe_code)]

//! Minimal in-memory host for unit tests.
//!
//! Elements are plain ids; `focusable` lists what may take focus and
//! `children` maps a surface to its focusable descendants. The full
//! simulated host with a clock and element tree lives in `ariactl-harness`.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

use ariactl_core::{
    CapabilityError, ElementRef, FocusQuery, FocusSink, InertToggle, ItemElements,
    MediaQuerySignal, PaintCommitSignal, PaintTicket, Timer, TimerHandle,
};

pub(crate) const DOCUMENT: ElementRef = ElementRef::new(0);

#[derive(Debug, Default)]
pub(crate) struct HostState {
    pub focused: Option<ElementRef>,
    pub focusable: BTreeSet<ElementRef>,
    pub children: HashMap<ElementRef, Vec<ElementRef>>,
    pub inert: BTreeSet<ElementRef>,
    pub reduced_motion: bool,
    pub next_handle: u64,
    pub timers: BTreeSet<TimerHandle>,
    pub timer_delays: Vec<Duration>,
    pub peak_timers: usize,
    pub tickets: BTreeSet<PaintTicket>,
    pub items: HashMap<usize, ElementRef>,
    pub focus_log: Vec<ElementRef>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeHost(pub Rc<RefCell<HostState>>);

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_focusable(self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.0
            .borrow_mut()
            .focusable
            .extend(ids.into_iter().map(ElementRef::new));
        self
    }

    pub fn with_children(self, parent: u64, ids: &[u64]) -> Self {
        self.0.borrow_mut().children.insert(
            ElementRef::new(parent),
            ids.iter().copied().map(ElementRef::new).collect(),
        );
        self
    }

    pub fn with_reduced_motion(self, on: bool) -> Self {
        self.0.borrow_mut().reduced_motion = on;
        self
    }

    /// Render items `[start, end)` as elements `1000 + index`.
    pub fn render_items(&self, start: usize, end: usize) {
        let mut st = self.0.borrow_mut();
        st.items.clear();
        for i in start..end {
            let el = ElementRef::new(1000 + i as u64);
            st.items.insert(i, el);
            st.focusable.insert(el);
        }
    }

    pub fn set_focus(&self, id: u64) {
        self.0.borrow_mut().focused = Some(ElementRef::new(id));
    }

    pub fn detach(&self, id: u64) {
        let mut st = self.0.borrow_mut();
        let el = ElementRef::new(id);
        st.focusable.remove(&el);
        if st.focused == Some(el) {
            st.focused = None;
        }
    }

    pub fn focused(&self) -> Option<u64> {
        self.0.borrow().focused.map(ElementRef::raw)
    }

    pub fn live_timers(&self) -> usize {
        self.0.borrow().timers.len()
    }

    pub fn peak_timers(&self) -> usize {
        self.0.borrow().peak_timers
    }

    pub fn pending_tickets(&self) -> usize {
        self.0.borrow().tickets.len()
    }

    pub fn is_inert(&self, id: u64) -> bool {
        self.0.borrow().inert.contains(&ElementRef::new(id))
    }

    /// Consume the single live timer as if it fired.
    pub fn fire_timer(&self) -> bool {
        let mut st = self.0.borrow_mut();
        let Some(handle) = st.timers.iter().next().copied() else {
            return false;
        };
        st.timers.remove(&handle);
        true
    }

    /// Consume every pending paint ticket as if the frame committed.
    pub fn commit_paint(&self) -> bool {
        let mut st = self.0.borrow_mut();
        let had = !st.tickets.is_empty();
        st.tickets.clear();
        had
    }
}

impl FocusSink for FakeHost {
    fn focus(&mut self, target: ElementRef) -> Result<(), CapabilityError> {
        let mut st = self.0.borrow_mut();
        if !st.focusable.contains(&target) || st.inert.contains(&target) {
            return Err(CapabilityError::StaleTarget(target));
        }
        st.focused = Some(target);
        st.focus_log.push(target);
        Ok(())
    }
}

impl FocusQuery for FakeHost {
    fn currently_focused(&self) -> Option<ElementRef> {
        self.0.borrow().focused
    }

    fn is_focusable(&self, el: ElementRef) -> bool {
        let st = self.0.borrow();
        st.focusable.contains(&el) && !st.inert.contains(&el)
    }

    fn focusable_within(&self, root: ElementRef) -> Vec<ElementRef> {
        let st = self.0.borrow();
        st.children
            .get(&root)
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| st.focusable.contains(id))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl InertToggle for FakeHost {
    fn set_inert(&mut self, root: ElementRef, inert: bool) -> Result<(), CapabilityError> {
        if root == DOCUMENT {
            return Err(CapabilityError::DocumentRoot);
        }
        let mut st = self.0.borrow_mut();
        if inert {
            st.inert.insert(root);
        } else {
            st.inert.remove(&root);
        }
        Ok(())
    }
}

impl MediaQuerySignal for FakeHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.0.borrow().reduced_motion
    }
}

impl Timer for FakeHost {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let mut st = self.0.borrow_mut();
        st.next_handle += 1;
        let handle = TimerHandle::new(st.next_handle);
        st.timers.insert(handle);
        st.timer_delays.push(delay);
        st.peak_timers = st.peak_timers.max(st.timers.len());
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.0.borrow_mut().timers.remove(&handle);
    }
}

impl PaintCommitSignal for FakeHost {
    fn request_commit(&mut self) -> PaintTicket {
        let mut st = self.0.borrow_mut();
        st.next_handle += 1;
        let ticket = PaintTicket::new(st.next_handle);
        st.tickets.insert(ticket);
        ticket
    }

    fn cancel_commit(&mut self, ticket: PaintTicket) {
        self.0.borrow_mut().tickets.remove(&ticket);
    }
}

impl ItemElements for FakeHost {
    fn item_element(&self, index: usize) -> Option<ElementRef> {
        self.0.borrow().items.get(&index).copied()
    }
}
