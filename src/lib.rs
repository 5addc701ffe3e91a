//! Scaffold for stepping through grid puzzle algorithms.
//!
//! A [`puzzle::Puzzle`] is stepped by the [`driver`] on a background thread
//! while a [`render::Surface`] shows its latest frame. The two sides meet in
//! [`state::SharedState`].

pub mod colormap;
pub mod control;
pub mod driver;
pub mod error;
pub mod grid;
pub mod palette;
pub mod puzzle;
pub mod render;
pub mod session;
pub mod signal;
pub mod state;

#[cfg(feature = "cli")]
pub mod app;
#[cfg(feature = "cli")]
pub mod cli;

pub use error::PuzzleError;
pub use palette::Palette;
pub use puzzle::{Puzzle, Registry};
pub use state::{RunConfig, SharedState, Status};
