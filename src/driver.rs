//! Background loop that steps the active puzzle.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, trace};

use crate::error::PuzzleError;
use crate::signal::CancellationToken;
use crate::state::SharedState;

/// Sleep between checks while nothing is requested.
pub const IDLE_POLL: Duration = Duration::from_millis(10);

/// Sleep between checks while waiting for the next timed step.
pub const STEP_POLL: Duration = Duration::from_millis(1);

/// Most steps executed per lock acquisition when running to completion.
pub const RUN_BATCH: usize = 1024;

/// Longest a run-to-completion batch may hold the run state lock.
pub const RUN_BATCH_BUDGET: Duration = Duration::from_millis(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing requested, or the session is finished.
    Idle,
    /// Timed stepping is on but the interval has not elapsed yet.
    Waiting,
    /// A step was executed and its frame published.
    Stepped,
    /// Running to completion, more batches to go.
    Running,
    /// The step(s) just executed finished the puzzle.
    Completed,
}

/// Performs one iteration of the driver state machine at time `now`.
pub fn tick(shared: &SharedState, now: Instant) -> Result<Tick, PuzzleError> {
    let mut state = shared.lock();

    if state.session.is_finished() {
        state.clear_flags();
        return Ok(Tick::Idle);
    }

    if state.run_to_completion {
        let started = Instant::now();

        for _ in 0..RUN_BATCH {
            match state.session.step() {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => {
                    state.clear_flags();
                    return Err(e);
                }
            }

            if started.elapsed() >= RUN_BATCH_BUDGET {
                break;
            }
        }

        if !state.session.is_finished() {
            return Ok(Tick::Running);
        }

        state.clear_flags();
        shared.publish(state.session.image().clone());

        return Ok(Tick::Completed);
    }

    let due = if state.running {
        let due = state
            .last_step
            .map_or(true, |last| now.saturating_duration_since(last) >= state.config.step_interval);

        if !due {
            return Ok(Tick::Waiting);
        }

        state.last_step = Some(now);
        true
    } else if state.step_requested {
        state.step_requested = false;
        true
    } else {
        false
    };

    if !due {
        return Ok(Tick::Idle);
    }

    let finished = match state.session.step() {
        Ok(finished) => finished,
        Err(e) => {
            state.clear_flags();
            return Err(e);
        }
    };

    trace!("{} step {}", state.session.name(), state.session.steps());
    shared.publish(state.session.image().clone());

    if finished {
        state.clear_flags();
        Ok(Tick::Completed)
    } else {
        Ok(Tick::Stepped)
    }
}

/// Handle to the driver thread. Dropping it cancels and joins the thread.
pub struct Driver {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Driver {
    pub fn spawn(shared: Arc<SharedState>) -> io::Result<Self> {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = thread::Builder::new()
            .name("puzzle-driver".to_string())
            .spawn(move || run(&shared, &token))?;

        Ok(Self {
            cancel,
            handle: Some(handle),
        })
    }

    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.cancel.cancel();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Driver thread panicked");
            }
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(shared: &SharedState, cancel: &CancellationToken) {
    debug!("Driver started");

    while !cancel.is_cancelled() {
        match tick(shared, Instant::now()) {
            Ok(Tick::Idle) => thread::sleep(IDLE_POLL),
            Ok(Tick::Waiting) => thread::sleep(STEP_POLL),
            // let the UI thread at the lock between batches
            Ok(Tick::Running) => thread::yield_now(),
            Ok(_) => {}
            Err(e) => {
                error!("Step failed, run stopped: {}", e);
                thread::sleep(IDLE_POLL);
            }
        }
    }

    debug!("Driver stopped");
}
