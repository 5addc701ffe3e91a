use image::{Rgba, RgbaImage};
use log::trace;

use super::input::{parse_char_grid, read_char_grid};
use super::Puzzle;
use crate::error::PuzzleError;
use crate::grid::{Grid, Position};
use crate::palette::Palette;

const WALL: char = '#';
const OPEN: char = '.';
const START: char = 'S';

/// Breadth-first fill from `S` through every cell that is not a wall, one
/// distance layer per step. The answer is the number of cells reached.
pub struct FloodFill {
    cells: Grid<char>,
    visited: Grid<bool>,
    frontier: Vec<Position>,
    frame: RgbaImage,
    depth: u32,
    reached: usize,
    finished: bool,
}

impl FloodFill {
    pub const NAME: &'static str = "flood_fill";
    pub const INPUT: &'static str = concat!(env!("CARGO_MANIFEST_DIR"), "/inputs/flood_fill.txt");

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
        let palette = Palette::new([
            (WALL, [90, 90, 90]),
            (OPEN, [0, 0, 0]),
            (START, [255, 220, 0]),
        ]);
        let frame = palette.paint(&cells)?;

        let start = cells
            .position_of(|&c| c == START)
            .ok_or_else(|| PuzzleError::Input(format!("no start cell '{}' found", START)))?;

        let mut visited = Grid::new(cells.width(), cells.height(), &mut |_, _| false);
        visited
            .set(start.0, start.1, true)
            .map_err(|e| PuzzleError::Input(e.to_string()))?;

        Ok(Self {
            cells,
            visited,
            frontier: vec![start],
            frame,
            depth: 0,
            reached: 1,
            finished: false,
        })
    }

    /// Green shade that cycles with the distance from the start.
    fn shade(depth: u32) -> Rgba<u8> {
        let green = 80 + (depth * 7 % 176) as u8;

        Rgba([0, green, 40, 255])
    }
}

impl Puzzle for FloodFill {
    fn execute_step(&mut self) {
        if self.finished {
            return;
        }

        self.depth += 1;
        let color = Self::shade(self.depth);
        let mut next = Vec::new();

        for &position in &self.frontier {
            for (_, (x, y)) in self.cells.neighbor_positions(position) {
                let open = self.cells.get(x, y).is_some_and(|&c| c != WALL);

                if let Some(seen) = self.visited.get_mut(x, y) {
                    if open && !*seen {
                        *seen = true;
                        next.push((x, y));
                        self.frame.put_pixel(x as u32, y as u32, color);
                    }
                }
            }
        }

        trace!("depth {} reached {} new cells", self.depth, next.len());

        self.reached += next.len();
        self.frontier = next;
        self.finished = self.frontier.is_empty();
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

        Ok(self.reached.to_string())
    }
}
