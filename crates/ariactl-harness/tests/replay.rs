#![forbid(unsafe_code)]

//! Scenario replay tests against the checked-in walkthrough fixture.

use std::path::PathBuf;

use ariactl_harness::{ReplayError, StepSnapshot, replay_path, replay_str};
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init();
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn step_at(steps: &[StepSnapshot], line: usize) -> &StepSnapshot {
    steps
        .iter()
        .find(|s| s.line == line)
        .unwrap_or_else(|| panic!("no step recorded for line {line}"))
}

#[test]
fn walkthrough_replays_end_to_end() {
    init_tracing();
    let t = replay_path(fixture("walkthrough.jsonl")).expect("replay");
    assert_eq!(t.steps.len(), 18);

    // Three ticks: 0 -> 1 -> 2 -> 0.
    let slides: Vec<usize> = t.steps[..3].iter().map(|s| s.slide).collect();
    assert_eq!(slides, vec![1, 2, 0]);
    assert_eq!(t.steps[2].now_ms, 15_000);
    assert!(t.steps[2].playing);
    assert_eq!(t.steps[2].live, "off");

    let next = step_at(&t.steps, 7);
    assert_eq!((next.shelf_start, next.shelf_end), (6, 12));
    assert!(next.can_go_prev && next.can_go_next);

    let prev_painted = step_at(&t.steps, 10);
    assert_eq!((prev_painted.shelf_start, prev_painted.shelf_end), (0, 6));
    assert!(!prev_painted.can_go_prev);

    let opener = step_at(&t.steps, 12).focused;
    assert!(opener.is_some());

    let opened = step_at(&t.steps, 13);
    assert!(opened.dialog_open);
    assert_ne!(opened.focused, opener);

    // Forward tab wraps from the last control back to the first.
    let first = opened.focused;
    assert_eq!(step_at(&t.steps, 16).focused, first);
    assert_ne!(step_at(&t.steps, 17).focused, first);

    let closed = step_at(&t.steps, 18);
    assert!(!closed.dialog_open);
    assert_eq!(closed.focused, opener);

    let entered = step_at(&t.steps, 20);
    assert!(!entered.playing);
    assert_eq!(entered.live, "polite");
    assert_eq!(entered.live_timers, 0);

    let resumed = step_at(&t.steps, 21);
    assert!(resumed.playing);
    assert_eq!(resumed.live_timers, 1);

    let reduced = step_at(&t.steps, 22);
    assert!(!reduced.playing);
    assert_eq!(reduced.live_timers, 0);

    let last = t.last().expect("steps");
    assert_eq!(last.slide, 0);
    assert_eq!(last.now_ms, 25_000);
    assert_eq!(t.peak_live_timers, 1);
}

#[test]
fn page_focus_lands_on_edge_items() {
    let t = replay_path(fixture("walkthrough.jsonl")).expect("replay");
    let before_paint = step_at(&t.steps, 7).focused;
    let after_next = step_at(&t.steps, 8).focused;
    assert!(after_next.is_some());
    assert_ne!(after_next, before_paint);
    let after_prev = step_at(&t.steps, 10).focused;
    assert!(after_prev.is_some());
    assert_ne!(after_prev, after_next);
}

#[test]
fn replay_is_deterministic() {
    let a = replay_path(fixture("walkthrough.jsonl")).expect("replay");
    let b = replay_path(fixture("walkthrough.jsonl")).expect("replay");
    assert_eq!(a, b);
    assert_eq!(a.to_jsonl().unwrap(), b.to_jsonl().unwrap());
}

#[test]
fn missing_file_is_io_error() {
    let err = replay_path(fixture("does-not-exist.jsonl")).unwrap_err();
    assert!(matches!(err, ReplayError::Io(_)));
}

#[test]
fn bad_op_reports_its_line() {
    let script = "{}\n# comment\n{\"op\":\"paint\"}\n{\"op\":\"advance\"}\n";
    let err = replay_str(script).unwrap_err();
    assert!(matches!(err, ReplayError::Parse { line: 4, .. }));
    assert!(err.to_string().starts_with("line 4:"));
}

#[test]
fn reduced_motion_header_starts_paused() {
    let t = replay_str("{\"reduced_motion\":true}\n{\"op\":\"advance\",\"ms\":20000}\n").unwrap();
    let step = &t.steps[0];
    assert_eq!(step.slide, 0);
    assert!(!step.playing);
    assert_eq!(t.peak_live_timers, 0);
}

#[test]
fn backdrop_respects_header_flag() {
    let script = "{\"dismiss_on_backdrop\":false}\n\
                  {\"op\":\"dialog_open\"}\n\
                  {\"op\":\"dialog_backdrop\"}\n\
                  {\"op\":\"dialog_close\"}\n";
    let t = replay_str(script).unwrap();
    assert!(t.steps[1].dialog_open);
    assert!(!t.steps[2].dialog_open);
}

#[test]
fn shrinking_shelf_clamps_window() {
    let script = "{\"shelf_total\":18}\n\
                  {\"op\":\"shelf_next\"}\n\
                  {\"op\":\"shelf_next\"}\n\
                  {\"op\":\"shelf_set_total\",\"total\":8}\n";
    let t = replay_str(script).unwrap();
    assert_eq!(t.steps[1].shelf_start, 12);
    let clamped = &t.steps[2];
    assert_eq!((clamped.shelf_start, clamped.shelf_end), (2, 8));
    assert!(!clamped.can_go_next);
}
