#![cfg(feature = "cli")]

use std::collections::VecDeque;
use std::sync::Arc;

use image::RgbaImage;

use grid_puzzle_runner::{
    app::{run_headless, run_interactive},
    puzzle::{FloodFill, PerimeterWalk, Puzzle, Registry},
    render::{FrameWriter, Intent, Surface},
    PuzzleError, RunConfig, SharedState, Status,
};

const WALK: &str = "walk";
const FILL: &str = "fill";

// Safety net so a broken loop fails instead of hanging the test run
const MAX_FRAMES: usize = 1000;

fn walk() -> Result<Box<dyn Puzzle>, PuzzleError> {
    Ok(Box::new(PerimeterWalk::from_input("x...\n....\n....\n")?))
}

fn fill() -> Result<Box<dyn Puzzle>, PuzzleError> {
    Ok(Box::new(FloodFill::from_input("#####\n#S..#\n#.#.#\n#...#\n#####\n")?))
}

fn create_test_state(selected: &str) -> Arc<SharedState> {
    let mut registry = Registry::new();
    registry.register(WALK, walk).unwrap();
    registry.register(FILL, fill).unwrap();

    Arc::new(SharedState::new(registry, selected, RunConfig::default()).unwrap())
}

/// Surface that replays one batch of intents per frame and records what it was given.
struct ScriptedSurface {
    script: VecDeque<Vec<Intent>>,
    wait_for_finish: bool,
    frames: usize,
    finished_frames: usize,
    uploads: Vec<RgbaImage>,
    presented: Vec<Status>,
}

impl ScriptedSurface {
    fn new(script: Vec<Vec<Intent>>, wait_for_finish: bool) -> Self {
        Self {
            script: script.into(),
            wait_for_finish,
            frames: 0,
            finished_frames: 0,
            uploads: Vec::new(),
            presented: Vec::new(),
        }
    }
}

impl Surface for ScriptedSurface {
    type Error = String;

    fn upload(&mut self, frame: &RgbaImage) -> Result<(), Self::Error> {
        self.uploads.push(frame.clone());
        Ok(())
    }

    fn poll_intents(&mut self) -> Vec<Intent> {
        self.frames += 1;
        self.script.pop_front().unwrap_or_default()
    }

    fn present(&mut self, status: &Status) -> Result<(), Self::Error> {
        if status.finished {
            self.finished_frames += 1;
        }

        self.presented.push(status.clone());
        Ok(())
    }

    fn should_quit(&self) -> bool {
        if self.frames >= MAX_FRAMES {
            return true;
        }

        if !self.script.is_empty() {
            return false;
        }

        if self.wait_for_finish {
            // one extra frame so the completion frame gets uploaded
            self.finished_frames >= 2
        } else {
            self.frames >= 5
        }
    }
}

struct FailingSurface;

impl Surface for FailingSurface {
    type Error = String;

    fn upload(&mut self, _frame: &RgbaImage) -> Result<(), Self::Error> {
        Err("no display".to_string())
    }

    fn poll_intents(&mut self) -> Vec<Intent> {
        Vec::new()
    }

    fn present(&mut self, _status: &Status) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn test_interactive_run_to_completion() {
    let shared = create_test_state(FILL);
    let mut surface = ScriptedSurface::new(vec![vec![Intent::RunToCompletion]], true);

    run_interactive(&shared, &mut surface).unwrap();

    assert!(surface.frames < MAX_FRAMES);

    let status = surface.presented.last().unwrap();
    assert!(status.finished);
    assert_eq!(status.result.as_deref(), Some("8"));
    assert_eq!(surface.uploads.first().unwrap(), &fill().unwrap().image().clone());
    assert_eq!(surface.uploads.last().unwrap(), &*shared.frame());
}

#[test]
fn test_interactive_quit_stops_before_presenting() {
    let shared = create_test_state(WALK);
    let mut surface = ScriptedSurface::new(vec![vec![Intent::Quit, Intent::Step]], false);

    run_interactive(&shared, &mut surface).unwrap();

    assert_eq!(surface.frames, 1);
    assert!(surface.presented.is_empty());
    assert_eq!(surface.uploads.len(), 1);
    assert_eq!(shared.status().steps, 0);
}

#[test]
fn test_interactive_switch_uploads_new_size() {
    let shared = create_test_state(WALK);
    let mut surface = ScriptedSurface::new(vec![vec![Intent::Select(FILL.to_string())]], false);

    run_interactive(&shared, &mut surface).unwrap();

    let sizes: Vec<_> = surface.uploads.iter().map(|frame| frame.dimensions()).collect();
    assert_eq!(sizes.first(), Some(&(4, 3)));
    assert_eq!(sizes.last(), Some(&(5, 5)));
    assert_eq!(surface.presented.last().unwrap().selected, FILL);
}

#[test]
fn test_interactive_ignores_disabled_controls() {
    let shared = create_test_state(WALK);
    let script = vec![
        vec![Intent::ToggleRunning],
        vec![Intent::Step, Intent::Select(FILL.to_string())],
        vec![Intent::Reset],
    ];
    let mut surface = ScriptedSurface::new(script, false);

    run_interactive(&shared, &mut surface).unwrap();

    let status = shared.status();
    assert_eq!(status.selected, WALK);
    assert!(!status.running);
}

#[test]
fn test_interactive_surface_error_is_returned() {
    let shared = create_test_state(WALK);

    assert!(run_interactive(&shared, &mut FailingSurface).is_err());
}

#[test]
fn test_headless_returns_result() {
    let shared = create_test_state(FILL);

    assert_eq!(run_headless(&shared).unwrap(), "8");
    assert!(shared.status().finished);
}

#[test]
fn test_headless_builtin_walk() {
    let shared = Arc::new(
        SharedState::new(Registry::builtin(), PerimeterWalk::NAME, RunConfig::default()).unwrap(),
    );

    // 24x14 border
    assert_eq!(run_headless(&shared).unwrap(), "72");
}

#[test]
fn test_frame_writer_scales_by_nearest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let shared = create_test_state(WALK);

    let writer = FrameWriter::new(path.clone(), 3.0);
    writer.write(&shared.frame()).unwrap();

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (12, 9));
    assert_eq!(saved.get_pixel(2, 2), shared.frame().get_pixel(0, 0));
    assert_eq!(saved.get_pixel(3, 0), shared.frame().get_pixel(1, 0));
}
