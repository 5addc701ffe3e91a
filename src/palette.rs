use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::grid::Grid;

/// Colors for the characters of a puzzle input.
///
/// Serialized as a JSON object of single-character keys, e.g.
/// `{".": [0, 0, 0], "#": [90, 90, 90]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: BTreeMap<char, [u8; 3]>,
}

impl Palette {
    pub fn new<I: IntoIterator<Item = (char, [u8; 3])>>(entries: I) -> Self {
        Self {
            colors: entries.into_iter().collect(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PuzzleError> {
        let reader = BufReader::new(File::open(path)?);

        Ok(serde_json::from_reader(reader)?)
    }

    pub fn insert(&mut self, key: char, rgb: [u8; 3]) {
        self.colors.insert(key, rgb);
    }

    pub fn get(&self, key: char) -> Option<Rgba<u8>> {
        self.colors.get(&key).map(|&[r, g, b]| Rgba([r, g, b, 255]))
    }

    pub fn color(&self, key: char) -> Result<Rgba<u8>, PuzzleError> {
        self.get(key).ok_or(PuzzleError::UnmappedChar(key))
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.colors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Renders one opaque pixel per cell.
    pub fn paint(&self, cells: &Grid<char>) -> Result<RgbaImage, PuzzleError> {
        let mut image = RgbaImage::new(cells.width() as u32, cells.height() as u32);

        for (x, y, &key) in cells {
            image.put_pixel(x as u32, y as u32, self.color(key)?);
        }

        Ok(image)
    }
}

impl FromIterator<(char, [u8; 3])> for Palette {
    fn from_iter<I: IntoIterator<Item = (char, [u8; 3])>>(iter: I) -> Self {
        Self::new(iter)
    }
}
