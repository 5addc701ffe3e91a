use thiserror::Error;

/// Errors raised by puzzles, the registry and palettes
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("Puzzle not found: {name}")]
    NotFound { name: String },

    #[error("The result was queried before the puzzle finished")]
    PrematureQuery,

    #[error("Puzzle '{name}' is already registered")]
    DuplicateName { name: String },

    #[error("Invalid puzzle input: {0}")]
    Input(String),

    #[error("No color mapped for character {0:?}")]
    UnmappedChar(char),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid palette: {0}")]
    Palette(#[from] serde_json::Error),
}
