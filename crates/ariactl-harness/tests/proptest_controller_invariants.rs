#![forbid(unsafe_code)]

//! Property-based invariant tests for the three controllers.
//!
//! Verifies:
//! 1. The shelf window always stays inside `[0, max(0, total - page_size)]`
//! 2. Paging past either end is an idempotent no-op
//! 3. Carousel navigation wraps modulo the slide count
//! 4. At most one carousel timer is ever armed, under any input sequence
//! 5. An armed timer exists exactly when rotation should run
//! 6. While a dialog is open, focus never leaves its boundary

use std::time::Duration;

use ariactl_core::{CarouselConfig, PagedListConfig};
use ariactl_harness::{DOCUMENT, Session, SessionOptions, SimHost};
use ariactl_widgets::{CarouselController, PagedListController};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum ShelfOp {
    Next,
    Prev,
    SetTotal(usize),
    SetPageSize(usize),
    Paint,
}

fn shelf_op() -> impl Strategy<Value = ShelfOp> {
    prop_oneof![
        4 => Just(ShelfOp::Next),
        4 => Just(ShelfOp::Prev),
        1 => (0usize..60).prop_map(ShelfOp::SetTotal),
        1 => (0usize..12).prop_map(ShelfOp::SetPageSize),
        2 => Just(ShelfOp::Paint),
    ]
}

#[derive(Debug, Clone)]
enum CarouselOp {
    Next,
    Prev,
    GoTo(isize),
    Pause,
    Toggle,
    PointerDown,
    FocusEnter,
    FocusLeave,
    ReducedMotion(bool),
    Advance(u64),
    SetCount(usize),
    SetInterval(u64),
    SetAutoplay(bool),
}

fn carousel_op() -> impl Strategy<Value = CarouselOp> {
    prop_oneof![
        1 => Just(CarouselOp::Next),
        1 => Just(CarouselOp::Prev),
        1 => (-20isize..20).prop_map(CarouselOp::GoTo),
        1 => Just(CarouselOp::Pause),
        1 => Just(CarouselOp::Toggle),
        1 => Just(CarouselOp::PointerDown),
        1 => Just(CarouselOp::FocusEnter),
        1 => Just(CarouselOp::FocusLeave),
        1 => any::<bool>().prop_map(CarouselOp::ReducedMotion),
        3 => (0u64..12_000).prop_map(CarouselOp::Advance),
        1 => (0usize..6).prop_map(CarouselOp::SetCount),
        1 => prop_oneof![Just(0u64), 100u64..3000].prop_map(CarouselOp::SetInterval),
        1 => any::<bool>().prop_map(CarouselOp::SetAutoplay),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Shelf window bounds and idempotent edges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shelf_window_stays_in_bounds(
        total in 0usize..60,
        page_size in 0usize..12,
        ops in proptest::collection::vec(shelf_op(), 0..40),
    ) {
        let host = SimHost::new();
        let list = host.add(DOCUMENT, false);
        let mut shelf = PagedListController::new(
            PagedListConfig::default().with_page_size(page_size),
            total,
            host.clone(),
            host.clone(),
        );
        host.render_items(list, shelf.visible_range());

        let mut total = total;
        let mut page = page_size.max(1);
        for op in ops {
            match op {
                ShelfOp::Next => { shelf.go_next(); }
                ShelfOp::Prev => { shelf.go_prev(); }
                ShelfOp::SetTotal(t) => { total = t; shelf.set_total(t); }
                ShelfOp::SetPageSize(p) => { page = p.max(1); shelf.set_page_size(p); }
                ShelfOp::Paint => {
                    host.render_items(list, shelf.visible_range());
                    if !host.commit_paint().is_empty() {
                        shelf.on_paint_commit();
                    }
                }
            }
            let state = shelf.state();
            prop_assert!(state.start_index <= total.saturating_sub(page));
            prop_assert_eq!(state.end_index, (state.start_index + page).min(total));
            prop_assert_eq!(state.can_go_prev, state.start_index > 0);
            prop_assert_eq!(state.can_go_next, state.end_index < total);
            prop_assert!(host.pending_paints() <= 1);
        }
    }

    #[test]
    fn paging_past_the_ends_is_a_no_op(total in 0usize..60, page_size in 1usize..12) {
        let host = SimHost::new();
        let mut shelf = PagedListController::new(
            PagedListConfig::default().with_page_size(page_size),
            total,
            host.clone(),
            host.clone(),
        );
        while shelf.go_next() {}
        let at_end = shelf.state();
        let paints = host.pending_paints();
        prop_assert!(!shelf.go_next());
        prop_assert_eq!(shelf.state(), at_end);
        prop_assert_eq!(host.pending_paints(), paints);

        while shelf.go_prev() {}
        let at_start = shelf.state();
        prop_assert_eq!(at_start.start_index, 0);
        prop_assert!(!shelf.go_prev());
        prop_assert_eq!(shelf.state(), at_start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Carousel wrap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn go_to_wraps_modulo_count(count in 1usize..10, index in -100isize..100) {
        let host = SimHost::new();
        let mut carousel = CarouselController::new(CarouselConfig::default(), count, &host, host.clone());
        carousel.go_to(index);
        prop_assert_eq!(carousel.active_index(), index.rem_euclid(count as isize) as usize);
        prop_assert!(!carousel.is_playing());
    }

    #[test]
    fn next_n_times_returns_home(count in 1usize..10, start in 0usize..10) {
        let host = SimHost::new();
        let mut carousel = CarouselController::new(CarouselConfig::default(), count, &host, host.clone());
        carousel.go_to(start as isize);
        let home = carousel.active_index();
        for _ in 0..count {
            carousel.go_next();
        }
        prop_assert_eq!(carousel.active_index(), home);
        for _ in 0..count {
            carousel.go_prev();
        }
        prop_assert_eq!(carousel.active_index(), home);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Timer singularity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn at_most_one_timer_ever(
        count in 0usize..6,
        reduced in any::<bool>(),
        ops in proptest::collection::vec(carousel_op(), 0..60),
    ) {
        let host = SimHost::new().with_reduced_motion(reduced);
        let mut carousel = CarouselController::new(
            CarouselConfig::default().with_interval_ms(1000),
            count,
            &host,
            host.clone(),
        );
        for op in ops {
            match op {
                CarouselOp::Next => carousel.go_next(),
                CarouselOp::Prev => carousel.go_prev(),
                CarouselOp::GoTo(i) => carousel.go_to(i),
                CarouselOp::Pause => carousel.pause(),
                CarouselOp::Toggle => carousel.toggle_play(),
                CarouselOp::PointerDown => carousel.on_toggle_pointer_down(),
                CarouselOp::FocusEnter => carousel.on_focus_enter(),
                CarouselOp::FocusLeave => carousel.on_focus_leave(),
                CarouselOp::ReducedMotion(on) => {
                    host.set_reduced_motion(on);
                    carousel.on_reduced_motion_change(on);
                }
                CarouselOp::Advance(ms) => {
                    host.advance(Duration::from_millis(ms), |_| carousel.tick());
                }
                CarouselOp::SetCount(n) => carousel.set_count(n),
                CarouselOp::SetInterval(ms) => carousel.set_interval(Duration::from_millis(ms)),
                CarouselOp::SetAutoplay(on) => carousel.set_autoplay_enabled(on),
            }
            let state = carousel.state();
            prop_assert!(host.live_timers() <= 1);
            prop_assert_eq!(carousel.is_rotating(), host.live_timers() == 1);
            if state.count == 0 {
                prop_assert_eq!(state.active_index, 0);
                prop_assert!(!carousel.is_rotating());
            } else {
                prop_assert!(state.active_index < state.count);
            }
            if carousel.is_rotating() {
                prop_assert!(state.playing);
                prop_assert!(!carousel.motion_suppressed());
            }
        }
        prop_assert!(host.peak_live_timers() <= 1);
        drop(carousel);
        prop_assert_eq!(host.live_timers(), 0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Focus containment
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum DialogOp {
    Tab(bool),
    StrayFocus(usize),
    Advance(u64),
    ShelfNext,
    Paint,
}

fn dialog_op() -> impl Strategy<Value = DialogOp> {
    prop_oneof![
        4 => any::<bool>().prop_map(DialogOp::Tab),
        2 => (0usize..4).prop_map(DialogOp::StrayFocus),
        1 => (0u64..12_000).prop_map(DialogOp::Advance),
        1 => Just(DialogOp::ShelfNext),
        1 => Just(DialogOp::Paint),
    ]
}

proptest! {
    #[test]
    fn focus_stays_inside_open_dialog(
        controls in 1usize..5,
        ops in proptest::collection::vec(dialog_op(), 0..40),
    ) {
        let mut s = Session::new(SessionOptions {
            dialog_controls: controls,
            ..SessionOptions::default()
        })
        .expect("session");
        s.focus_opener();
        prop_assert!(s.dialog.open());

        let outside = [s.layout.opener, s.layout.skip_link, s.layout.app_root, s.layout.shelf_list];
        for op in ops {
            match op {
                DialogOp::Tab(shift) => { s.tab(shift); }
                DialogOp::StrayFocus(i) => {
                    s.host.click_focus(outside[i]);
                    s.dialog.on_focus_in(outside[i]);
                }
                DialogOp::Advance(ms) => { s.advance(Duration::from_millis(ms)); }
                DialogOp::ShelfNext => { s.shelf.go_next(); }
                DialogOp::Paint => { s.paint(); }
            }
            let focused = s.host.focused();
            prop_assert!(focused.is_some_and(|f| s.dialog.boundary().contains(f)),
                "focus escaped to {:?}", focused);
        }

        prop_assert!(s.dialog.close());
        prop_assert_eq!(s.host.focused(), Some(s.layout.opener));
    }
}
