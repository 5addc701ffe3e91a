use image::imageops::{self, FilterType};
use image::{ImageResult, RgbaImage};
use log::info;
use std::path::PathBuf;

/// Saves frames to disk, enlarged by an integer factor
pub struct FrameWriter {
    output_path: PathBuf,
    scale: u32,
}

impl FrameWriter {
    pub fn new(output_path: PathBuf, scale: f32) -> Self {
        Self {
            output_path,
            scale: scale.round().max(1.0) as u32,
        }
    }

    pub fn scaled(&self, frame: &RgbaImage) -> RgbaImage {
        if self.scale == 1 {
            return frame.clone();
        }

        let (width, height) = frame.dimensions();

        imageops::resize(frame, width * self.scale, height * self.scale, FilterType::Nearest)
    }

    pub fn write(&self, frame: &RgbaImage) -> ImageResult<()> {
        self.scaled(frame).save(&self.output_path)?;
        info!("Saved frame to {}", self.output_path.display());

        Ok(())
    }
}
