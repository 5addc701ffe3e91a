pub mod events;
pub mod image_renderer;

#[cfg(feature = "sdl2")]
pub mod sdl_renderer;

use image::RgbaImage;

pub use events::Intent;
pub use image_renderer::FrameWriter;

use crate::state::Status;

/// Display and input side of the interactive loop
pub trait Surface {
    type Error;

    /// Upload a newly published frame, reallocating if its size changed
    fn upload(&mut self, frame: &RgbaImage) -> Result<(), Self::Error>;

    /// Collect the user's requests since the last call
    fn poll_intents(&mut self) -> Vec<Intent>;

    /// Draw the last uploaded frame and the controls for `status`
    fn present(&mut self, status: &Status) -> Result<(), Self::Error>;

    /// Check if the user wants to quit
    fn should_quit(&self) -> bool {
        false
    }
}
