#![forbid(unsafe_code)]

//! JSONL scenario replay.
//!
//! A scenario is a header line followed by one operation per line:
//!
//! ```text
//! {"shelf":{"page_size":6},"shelf_total":18,"slides":3}
//! {"op":"shelf_next"}
//! {"op":"paint"}
//! {"op":"advance","ms":5000}
//! {"op":"dialog_open"}
//! {"op":"tab","shift":true}
//! ```
//!
//! Every header field is optional. Blank lines and lines starting with `#`
//! are skipped. Replay drives a fresh [`Session`] and records a
//! [`StepSnapshot`] after each operation; the same script always yields the
//! same [`Transcript`].

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use ariactl_core::{CarouselConfig, ConfigError, PagedListConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::{Session, SessionOptions};

/// First line of a scenario.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayHeader {
    pub shelf: PagedListConfig,
    pub shelf_total: usize,
    pub carousel: CarouselConfig,
    pub slides: usize,
    pub dialog_controls: usize,
    pub dismiss_on_backdrop: bool,
    pub reduced_motion: bool,
}

impl Default for ReplayHeader {
    fn default() -> Self {
        let opts = SessionOptions::default();
        Self {
            shelf: opts.shelf,
            shelf_total: opts.shelf_total,
            carousel: opts.carousel,
            slides: opts.slides,
            dialog_controls: opts.dialog_controls,
            dismiss_on_backdrop: opts.dismiss_on_backdrop,
            reduced_motion: opts.reduced_motion,
        }
    }
}

impl From<ReplayHeader> for SessionOptions {
    fn from(h: ReplayHeader) -> Self {
        Self {
            shelf: h.shelf,
            shelf_total: h.shelf_total,
            carousel: h.carousel,
            slides: h.slides,
            dialog_controls: h.dialog_controls,
            dismiss_on_backdrop: h.dismiss_on_backdrop,
            reduced_motion: h.reduced_motion,
        }
    }
}

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum ReplayOp {
    ShelfNext,
    ShelfPrev,
    ShelfSetTotal { total: usize },
    Paint,
    CarouselNext,
    CarouselPrev,
    CarouselGoTo { index: isize },
    CarouselPause,
    CarouselToggle,
    CarouselTogglePointerDown,
    CarouselFocusEnter,
    CarouselFocusLeave,
    ReducedMotion { value: bool },
    Advance { ms: u64 },
    DialogOpen,
    DialogClose,
    DialogEscape,
    DialogBackdrop,
    Tab { shift: bool },
    FocusOpener,
}

/// Observable state after one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSnapshot {
    /// 1-based script line of the operation.
    pub line: usize,
    pub shelf_start: usize,
    pub shelf_end: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub slide: usize,
    pub playing: bool,
    pub live: String,
    pub dialog_open: bool,
    pub focused: Option<u64>,
    pub live_timers: usize,
    pub now_ms: u64,
}

/// Result of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub steps: Vec<StepSnapshot>,
    pub peak_live_timers: usize,
}

impl Transcript {
    /// Final snapshot, if any operation ran.
    #[must_use]
    pub fn last(&self) -> Option<&StepSnapshot> {
        self.steps.last()
    }

    /// Serialize as one JSON object per line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for step in &self.steps {
            out.push_str(&serde_json::to_string(step)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Replay failure.
#[derive(Debug)]
pub enum ReplayError {
    Io(io::Error),
    /// The script has no header line.
    Empty,
    /// A line failed to parse.
    Parse { line: usize, source: serde_json::Error },
    /// The header produced an invalid dialog configuration.
    Config(ConfigError),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read scenario: {err}"),
            Self::Empty => write!(f, "scenario has no header line"),
            Self::Parse { line, source } => write!(f, "line {line}: {source}"),
            Self::Config(err) => write!(f, "invalid scenario config: {err}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse { source, .. } => Some(source),
            Self::Config(err) => Some(err),
            Self::Empty => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for ReplayError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Replay a scenario file.
pub fn replay_path(path: impl AsRef<Path>) -> Result<Transcript, ReplayError> {
    let file = File::open(path.as_ref())?;
    replay_reader(BufReader::new(file))
}

/// Replay a scenario held in memory.
pub fn replay_str(script: &str) -> Result<Transcript, ReplayError> {
    replay_reader(script.as_bytes())
}

/// Replay a scenario from any buffered reader.
pub fn replay_reader<R: BufRead>(reader: R) -> Result<Transcript, ReplayError> {
    let mut session: Option<Session> = None;
    let mut steps = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(active) = session.as_mut() else {
            let header: ReplayHeader = serde_json::from_str(trimmed)
                .map_err(|source| ReplayError::Parse { line: line_no, source })?;
            session = Some(Session::new(header.into())?);
            continue;
        };

        let op: ReplayOp = serde_json::from_str(trimmed)
            .map_err(|source| ReplayError::Parse { line: line_no, source })?;
        debug!(line = line_no, ?op, "replay op");
        apply(active, op);
        steps.push(snapshot(active, line_no));
    }

    let session = session.ok_or(ReplayError::Empty)?;
    Ok(Transcript {
        steps,
        peak_live_timers: session.host.peak_live_timers(),
    })
}

fn apply(s: &mut Session, op: ReplayOp) {
    match op {
        ReplayOp::ShelfNext => {
            s.shelf.go_next();
        }
        ReplayOp::ShelfPrev => {
            s.shelf.go_prev();
        }
        ReplayOp::ShelfSetTotal { total } => s.shelf.set_total(total),
        ReplayOp::Paint => {
            s.paint();
        }
        ReplayOp::CarouselNext => s.carousel.go_next(),
        ReplayOp::CarouselPrev => s.carousel.go_prev(),
        ReplayOp::CarouselGoTo { index } => s.carousel.go_to(index),
        ReplayOp::CarouselPause => s.carousel.pause(),
        ReplayOp::CarouselToggle => s.carousel.toggle_play(),
        ReplayOp::CarouselTogglePointerDown => s.carousel.on_toggle_pointer_down(),
        ReplayOp::CarouselFocusEnter => s.carousel.on_focus_enter(),
        ReplayOp::CarouselFocusLeave => s.carousel.on_focus_leave(),
        ReplayOp::ReducedMotion { value } => s.set_reduced_motion(value),
        ReplayOp::Advance { ms } => {
            s.advance(Duration::from_millis(ms));
        }
        ReplayOp::DialogOpen => {
            s.dialog.open();
        }
        ReplayOp::DialogClose => {
            s.dialog.close();
        }
        ReplayOp::DialogEscape => {
            s.dialog.on_escape();
        }
        ReplayOp::DialogBackdrop => {
            s.dialog.on_backdrop_activate();
        }
        ReplayOp::Tab { shift } => {
            s.tab(shift);
        }
        ReplayOp::FocusOpener => {
            s.focus_opener();
        }
    }
}

fn snapshot(s: &Session, line: usize) -> StepSnapshot {
    let shelf = s.shelf.state();
    let carousel = s.carousel.state();
    StepSnapshot {
        line,
        shelf_start: shelf.start_index,
        shelf_end: shelf.end_index,
        can_go_prev: shelf.can_go_prev,
        can_go_next: shelf.can_go_next,
        slide: carousel.active_index,
        playing: carousel.playing,
        live: carousel.live.as_str().to_owned(),
        dialog_open: s.dialog.is_open(),
        focused: s.host.focused().map(|el| el.raw()),
        live_timers: s.host.live_timers(),
        now_ms: s.host.now().as_millis() as u64,
    }
}
