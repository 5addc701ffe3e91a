//! State shared between the UI thread and the driver thread.
//!
//! Field ownership:
//!
//! | field | written by | read by |
//! | --- | --- | --- |
//! | `session` | driver (steps), UI (select / reset) | driver |
//! | `config` | UI | driver, UI |
//! | `running`, `run_to_completion`, `step_requested` | UI sets, driver clears | driver |
//! | `last_step` | driver | driver |
//! | published frame | driver, UI on install | UI |
//!
//! The run state lock is always taken before the frame lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use image::RgbaImage;
use log::{debug, info};

use crate::error::PuzzleError;
use crate::puzzle::Registry;
use crate::session::Session;
use crate::signal::ReadySignal;

pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(100);
pub const MIN_STEP_INTERVAL: Duration = Duration::from_millis(1);
pub const DEFAULT_SCALE: f32 = 18.0;
pub const MIN_SCALE: f32 = 1.0;
pub const MAX_SCALE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    pub step_interval: Duration,
    pub scale: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            step_interval: DEFAULT_STEP_INTERVAL,
            scale: DEFAULT_SCALE,
        }
    }
}

impl RunConfig {
    pub fn clamped(self) -> Self {
        Self {
            step_interval: self.step_interval.max(MIN_STEP_INTERVAL),
            scale: clamp_scale(self.scale),
        }
    }
}

pub fn clamp_scale(scale: f32) -> f32 {
    if scale.is_nan() {
        DEFAULT_SCALE
    } else {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    }
}

/// Parses a step interval in whole milliseconds, clamped to at least 1 ms.
/// Returns `None` for anything that is not an integer.
pub fn parse_step_interval(input: &str) -> Option<Duration> {
    let millis = input.trim().parse::<i64>().ok()?;

    Some(Duration::from_millis(millis.max(1) as u64))
}

pub struct RunState {
    pub(crate) session: Session,
    pub(crate) config: RunConfig,
    pub(crate) running: bool,
    pub(crate) run_to_completion: bool,
    pub(crate) step_requested: bool,
    pub(crate) last_step: Option<Instant>,
}

impl RunState {
    fn new(session: Session, config: RunConfig) -> Self {
        Self {
            session,
            config,
            running: false,
            run_to_completion: false,
            step_requested: false,
            last_step: None,
        }
    }

    pub(crate) fn clear_flags(&mut self) {
        self.running = false;
        self.run_to_completion = false;
        self.step_requested = false;
        self.last_step = None;
    }
}

/// Snapshot of the run state that the UI renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub selected: String,
    pub running: bool,
    pub run_to_completion: bool,
    pub finished: bool,
    pub result: Option<String>,
    pub steps: u64,
    pub step_interval: Duration,
    pub scale: f32,
    pub frame_size: (u32, u32),
}

impl Status {
    pub fn can_select(&self) -> bool {
        !self.running
    }

    pub fn can_toggle_running(&self) -> bool {
        !self.finished
    }

    pub fn can_step(&self) -> bool {
        !self.running && !self.finished
    }

    pub fn can_run_to_completion(&self) -> bool {
        !self.finished
    }

    pub fn can_edit_interval(&self) -> bool {
        !self.running
    }

    pub fn state_label(&self) -> &'static str {
        if self.finished {
            "finished"
        } else if self.run_to_completion {
            "completing"
        } else if self.running {
            "running"
        } else {
            "paused"
        }
    }

    pub fn summary(&self) -> String {
        let mut output = format!(
            "{} | {} | step {} | interval {}ms | scale {:.0}",
            self.selected,
            self.state_label(),
            self.steps,
            self.step_interval.as_millis(),
            self.scale,
        );

        if let Some(result) = &self.result {
            output.push_str(&format!(" | result: {}", result));
        }

        output
    }
}

/// The single shared-state object handed to both loops.
pub struct SharedState {
    registry: Registry,
    state: Mutex<RunState>,
    frame: Mutex<Arc<RgbaImage>>,
    ready: ReadySignal,
}

impl SharedState {
    /// Constructs `selected` through the registry and makes it the active session.
    pub fn new(registry: Registry, selected: &str, config: RunConfig) -> Result<Self, PuzzleError> {
        let session = Session::new(selected, registry.create(selected)?);
        let frame = Arc::new(session.image().clone());

        info!("Loaded puzzle {}", selected);

        Ok(Self {
            registry,
            state: Mutex::new(RunState::new(session, config.clamped())),
            frame: Mutex::new(frame),
            ready: ReadySignal::new(),
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ready(&self) -> &ReadySignal {
        &self.ready
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> Status {
        let state = self.lock();
        let image = state.session.image();

        Status {
            selected: state.session.name().to_string(),
            running: state.running,
            run_to_completion: state.run_to_completion,
            finished: state.session.is_finished(),
            result: state.session.result().map(str::to_string),
            steps: state.session.steps(),
            step_interval: state.config.step_interval,
            scale: state.config.scale,
            frame_size: image.dimensions(),
        }
    }

    /// Latest published frame.
    pub fn frame(&self) -> Arc<RgbaImage> {
        self.frame.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Swaps in a new frame and raises the ready signal.
    pub(crate) fn publish(&self, frame: RgbaImage) {
        *self.frame.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(frame);
        self.ready.set();
    }

    /// Replaces the session with a fresh instance of `name`. Returns false
    /// and leaves the session alone while timed stepping is on.
    pub fn select(&self, name: &str) -> Result<bool, PuzzleError> {
        self.install(name, false)
    }

    /// Reconstructs the selected puzzle, stopping any run.
    pub fn reset(&self) -> Result<(), PuzzleError> {
        let name = self.lock().session.name().to_string();

        self.install(&name, true).map(|_| ())
    }

    fn install(&self, name: &str, force: bool) -> Result<bool, PuzzleError> {
        let puzzle = self.registry.create(name)?;
        let session = Session::new(name, puzzle);
        let frame = session.image().clone();

        let mut state = self.lock();

        if state.running && !force {
            return Ok(false);
        }

        state.session = session;
        state.clear_flags();
        self.publish(frame);

        debug!("Installed fresh instance of {}", name);

        Ok(true)
    }

    pub fn set_running(&self, running: bool) {
        let mut state = self.lock();

        state.running = running && !state.session.is_finished();
        if state.running {
            state.run_to_completion = false;
        }
    }

    pub fn request_step(&self) {
        let mut state = self.lock();

        if !state.session.is_finished() {
            state.step_requested = true;
        }
    }

    pub fn request_run_to_completion(&self) {
        let mut state = self.lock();

        if !state.session.is_finished() {
            state.run_to_completion = true;
            state.running = false;
        }
    }

    pub fn set_step_interval(&self, interval: Duration) {
        self.lock().config.step_interval = interval.max(MIN_STEP_INTERVAL);
    }

    pub fn set_scale(&self, scale: f32) {
        self.lock().config.scale = clamp_scale(scale);
    }
}
