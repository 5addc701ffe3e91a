use image::RgbaImage;
use log::info;

use crate::error::PuzzleError;
use crate::puzzle::Puzzle;

/// The active puzzle instance together with its completion bookkeeping.
pub struct Session {
    name: String,
    puzzle: Box<dyn Puzzle>,
    steps: u64,
    finished: bool,
    result: Option<String>,
}

impl Session {
    pub fn new(name: impl Into<String>, puzzle: Box<dyn Puzzle>) -> Self {
        let finished = puzzle.is_finished();
        let result = if finished { puzzle.result().ok() } else { None };

        Self {
            name: name.into(),
            puzzle,
            steps: 0,
            finished,
            result,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn image(&self) -> &RgbaImage {
        self.puzzle.image()
    }

    /// Executes one step unless already finished. Captures the result on the
    /// step that completes the puzzle and returns whether it is finished.
    pub fn step(&mut self) -> Result<bool, PuzzleError> {
        if self.finished {
            return Ok(true);
        }

        self.puzzle.execute_step();
        self.steps += 1;

        if self.puzzle.is_finished() {
            let result = self.puzzle.result()?;
            info!("{} finished after {} steps: {}", self.name, self.steps, result);

            self.result = Some(result);
            self.finished = true;
        }

        Ok(self.finished)
    }
}
