use std::fs;
use std::path::Path;

use log::debug;

use crate::error::PuzzleError;
use crate::grid::Grid;

/// Parses a line-delimited character grid. Trailing blank lines are ignored.
pub fn parse_char_grid(text: &str) -> Result<Grid<char>, PuzzleError> {
    let mut rows: Vec<Vec<char>> = text
        .lines()
        .map(|line| line.trim_end_matches('\r').chars().collect())
        .collect();

    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }

    if rows.is_empty() || rows[0].is_empty() {
        return Err(PuzzleError::Input("input grid is empty".to_string()));
    }

    Grid::from_rows(rows).map_err(PuzzleError::Input)
}

pub fn read_char_grid<P: AsRef<Path>>(path: P) -> Result<Grid<char>, PuzzleError> {
    let path = path.as_ref();
    debug!("Reading puzzle input from {}", path.display());

    parse_char_grid(&fs::read_to_string(path)?)
}
