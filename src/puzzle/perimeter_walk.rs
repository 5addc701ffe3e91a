use image::{Rgba, RgbaImage};
use log::trace;

use super::input::{parse_char_grid, read_char_grid};
use super::Puzzle;
use crate::error::PuzzleError;
use crate::grid::{Direction, Grid, Position};
use crate::palette::Palette;

const FLOOR: char = '.';
const WALKER: char = 'x';

/// A walker that circles the border of the grid clockwise from the top-left
/// corner. The answer is the number of steps until it is back at the start.
pub struct PerimeterWalk {
    cells: Grid<char>,
    frame: RgbaImage,
    floor: Rgba<u8>,
    walker: Rgba<u8>,
    start: Position,
    position: Position,
    direction: Direction,
    steps: u64,
    finished: bool,
}

impl PerimeterWalk {
    pub const NAME: &'static str = "perimeter_walk";
    pub const INPUT: &'static str = concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/perimeter_walk.txt");

    pub fn factory() -> Result<Box<dyn Puzzle>, PuzzleError> {
        Ok(Box::new(Self::load()?))
    }

    pub fn load() -> Result<Self, PuzzleError> {
        Self::from_grid(read_char_grid(Self::INPUT)?)
    }

    pub fn from_input(text: &str) -> Result<Self, PuzzleError> {
        Self::from_grid(parse_char_grid(text)?)
    }

    fn from_grid(cells: Grid<char>) -> Result<Self, PuzzleError> {
        let palette = Palette::new([(FLOOR, [0, 0, 0]), (WALKER, [255, 0, 0])]);
        let frame = palette.paint(&cells)?;

        Ok(Self {
            floor: palette.color(FLOOR)?,
            walker: palette.color(WALKER)?,
            cells,
            frame,
            start: (0, 0),
            position: (0, 0),
            direction: Direction::Right,
            steps: 0,
            finished: false,
        })
    }

    fn paint(&mut self, (x, y): Position, key: char, color: Rgba<u8>) {
        if self.cells.set(x, y, key).is_ok() {
            self.frame.put_pixel(x as u32, y as u32, color);
        }
    }

    fn next_position(&mut self) -> Option<Position> {
        for _ in 0..Direction::ALL.len() {
            if let Some(next) = self.cells.step(self.position, self.direction) {
                return Some(next);
            }

            self.direction = self.direction.turn_right();
        }

        None
    }
}

impl Puzzle for PerimeterWalk {
    fn execute_step(&mut self) {
        if self.finished {
            return;
        }

        self.paint(self.position, FLOOR, self.floor);

        // a 1x1 grid has nowhere to go
        if let Some(next) = self.next_position() {
            self.position = next;
        }

        self.paint(self.position, WALKER, self.walker);
        self.steps += 1;

        trace!("walker at {:?} heading {:?}", self.position, self.direction);

        if self.position == self.start {
            self.finished = true;
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn image(&self) -> &RgbaImage {
        &self.frame
    }

    fn result(&self) -> Result<String, PuzzleError> {
        if !self.finished {
            return Err(PuzzleError::PrematureQuery);
        }

        Ok(self.steps.to_string())
    }
}
