use crate::cli::AppConfig;
use crate::control::{self, Outcome};
use crate::driver::Driver;
use crate::puzzle::Registry;
use crate::render::{FrameWriter, Intent, Surface};
use crate::state::SharedState;

#[cfg(feature = "sdl2")]
use crate::render::sdl_renderer::SdlSurface;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::error::Error;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// How long one UI iteration waits for a new frame.
pub const READY_WAIT: Duration = Duration::from_millis(1);

/// Minimum duration of one UI iteration.
pub const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Status refresh period of the headless progress spinner.
const HEADLESS_POLL: Duration = Duration::from_millis(50);

pub struct PuzzleApp {
    config: AppConfig,
    registry: Registry,
}

impl PuzzleApp {
    pub fn new(config: AppConfig, registry: Registry) -> Self {
        Self { config, registry }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        let PuzzleApp { config, registry } = self;

        let selected = match &config.puzzle {
            Some(name) => name.clone(),
            None => registry.first().ok_or("No puzzles are registered")?.to_string(),
        };

        info!("{} puzzles registered: {}", registry.len(), registry.names().join(", "));

        let shared = Arc::new(SharedState::new(registry, &selected, config.run)?);

        if config.headless {
            run_headless(&shared)?;
        } else {
            run_window(&config, &shared)?;
        }

        if let Some(output_path) = &config.output_path {
            let writer = FrameWriter::new(output_path.clone(), config.run.scale);
            writer.write(&shared.frame())?;
        }

        Ok(())
    }
}

#[cfg(feature = "sdl2")]
fn run_window(config: &AppConfig, shared: &Arc<SharedState>) -> Result<(), Box<dyn Error>> {
    let mut surface = SdlSurface::new(&config.window)?;

    run_interactive(shared, &mut surface)
}

#[cfg(not(feature = "sdl2"))]
fn run_window(_config: &AppConfig, _shared: &Arc<SharedState>) -> Result<(), Box<dyn Error>> {
    Err("Built without the sdl2 feature; use --headless".into())
}

/// Foreground loop: applies intents, re-uploads frames on the ready signal
/// and presents until the surface asks to quit. Owns the driver thread for
/// its duration.
pub fn run_interactive<S>(shared: &Arc<SharedState>, surface: &mut S) -> Result<(), Box<dyn Error>>
where
    S: Surface,
    S::Error: Into<Box<dyn Error>>,
{
    let driver = Driver::spawn(Arc::clone(shared))?;

    surface.upload(&shared.frame()).map_err(Into::<Box<dyn Error>>::into)?;

    'frames: loop {
        let started = Instant::now();

        for intent in surface.poll_intents() {
            if intent == Intent::Quit {
                break 'frames;
            }

            match control::apply(shared, intent.clone()) {
                Ok(Outcome::Applied) => {}
                Ok(outcome) => debug!("{:?} was {:?}", intent, outcome),
                Err(e) => warn!("{:?} failed: {}", intent, e),
            }
        }

        if shared.ready().wait_and_clear(READY_WAIT) {
            surface.upload(&shared.frame()).map_err(Into::<Box<dyn Error>>::into)?;
        }

        let status = shared.status();
        surface.present(&status).map_err(Into::<Box<dyn Error>>::into)?;

        if surface.should_quit() {
            break;
        }

        if let Some(remaining) = FRAME_PERIOD.checked_sub(started.elapsed()) {
            thread::sleep(remaining);
        }
    }

    driver.shutdown();

    let status = shared.status();
    if let Some(result) = &status.result {
        info!("Result of {}: {}", status.selected, result);
    }

    Ok(())
}

/// Runs the selected puzzle to completion on the driver thread and prints the result.
pub fn run_headless(shared: &Arc<SharedState>) -> Result<String, Box<dyn Error>> {
    let driver = Driver::spawn(Arc::clone(shared))?;

    let progress = ProgressBar::new_spinner();
    progress.enable_steady_tick(Duration::from_millis(200));
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} steps {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.set_message(shared.status().selected);

    shared.request_run_to_completion();

    let status = loop {
        shared.ready().wait_and_clear(HEADLESS_POLL);

        let status = shared.status();
        progress.set_position(status.steps);

        if status.finished {
            break status;
        }

        if !status.run_to_completion {
            driver.shutdown();
            progress.abandon();
            return Err(format!("{} stopped before finishing", status.selected).into());
        }
    };

    driver.shutdown();
    progress.finish();

    let result = status.result.unwrap_or_default();
    info!("{} finished after {} steps", status.selected, status.steps);
    println!("{}", result);

    Ok(result)
}
