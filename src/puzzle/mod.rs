//! Puzzle algorithms and the table they are registered in.
//!
//! Every puzzle implements [`Puzzle`]: the driver calls
//! [`Puzzle::execute_step`] until [`Puzzle::is_finished`] reports true, the
//! UI shows [`Puzzle::image`] after each step and [`Puzzle::result`] once the
//! run is over.

pub mod flood_fill;
pub mod input;
pub mod perimeter_walk;
pub mod registry;

use image::RgbaImage;

use crate::error::PuzzleError;

pub use flood_fill::FloodFill;
pub use perimeter_walk::PerimeterWalk;
pub use registry::{Factory, Registry};

/// A steppable, renderable, terminable puzzle computation.
pub trait Puzzle: Send {
    /// Advances the puzzle by one unit of work. Must not be relied upon
    /// after [`Puzzle::is_finished`] returns true.
    fn execute_step(&mut self);

    fn is_finished(&self) -> bool;

    /// Color grid as of the latest step, one pixel per cell.
    fn image(&self) -> &RgbaImage;

    /// Final answer. Fails with [`PuzzleError::PrematureQuery`] until finished.
    fn result(&self) -> Result<String, PuzzleError>;
}
