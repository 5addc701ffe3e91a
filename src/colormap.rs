//! Character to color lookup tables for puzzle inputs.
//!
//! Backs the `colormap` binary: collect the distinct characters of an input
//! file, assign each a color with one of the [`Mode`]s and print the table in
//! a form that can be pasted into a puzzle or loaded as a [`Palette`].

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "cli")]
use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::palette::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Template with blank color slots
    Empty,
    /// Random colors, distinct per channel
    Random,
    BlackToGreen,
    GreenToBlack,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Empty, Mode::Random, Mode::BlackToGreen, Mode::GreenToBlack];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Empty => "empty",
            Mode::Random => "random",
            Mode::BlackToGreen => "black-to-green",
            Mode::GreenToBlack => "green-to-black",
        }
    }

    pub fn variants() -> [&'static str; 4] {
        Self::ALL.map(Mode::name)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(format!("unknown mode: {}", s))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `('c', [r, g, b])` lines joined by commas, ready for `Palette::new([...])`
    Rust,
    /// Palette JSON
    Json,
}

impl Format {
    pub fn variants() -> [&'static str; 2] {
        ["rust", "json"]
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rust" => Ok(Format::Rust),
            "json" => Ok(Format::Json),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

/// Distinct characters of `text` in ascending order, line breaks excluded.
pub fn distinct_chars(text: &str) -> Vec<char> {
    text.chars()
        .filter(|&c| c != '\n' && c != '\r')
        .collect::<BTreeSet<char>>()
        .into_iter()
        .collect()
}

/// Puts `text` on the clipboard if there is one. Failures are logged and
/// reported as false so callers can fall back to printing.
#[cfg(feature = "cli")]
pub fn copy_to_clipboard(clipboard: Option<&mut arboard::Clipboard>, text: &str) -> bool {
    let Some(clipboard) = clipboard else {
        return false;
    };

    match clipboard.set_text(text) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not copy the table to the clipboard: {}", e);
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<(char, Option<[u8; 3]>)>,
}

impl ColorTable {
    pub fn generate<R: Rng + ?Sized>(mode: Mode, chars: &[char], rng: &mut R) -> Self {
        let entries = match mode {
            Mode::Empty => chars.iter().map(|&c| (c, None)).collect(),
            Mode::Random => Self::random(chars, rng),
            Mode::BlackToGreen => Self::gradient(chars, true),
            Mode::GreenToBlack => Self::gradient(chars, false),
        };

        Self { entries }
    }

    fn random<R: Rng + ?Sized>(chars: &[char], rng: &mut R) -> Vec<(char, Option<[u8; 3]>)> {
        let mut channels: [Vec<u8>; 3] = Default::default();

        for channel in channels.iter_mut() {
            *channel = (0..=255).collect();
            channel.shuffle(rng);
        }

        chars
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let i = i % 256;
                (c, Some([channels[0][i], channels[1][i], channels[2][i]]))
            })
            .collect()
    }

    fn gradient(chars: &[char], ascending: bool) -> Vec<(char, Option<[u8; 3]>)> {
        if chars.len() == 1 {
            return vec![(chars[0], Some([0, 255, 0]))];
        }

        let last = chars.len().saturating_sub(1).max(1) as f32;

        chars
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let green = (255.0 * i as f32 / last).round() as u8;
                let green = if ascending { green } else { 255 - green };

                (c, Some([0, green, 0]))
            })
            .collect()
    }

    pub fn entries(&self) -> &[(char, Option<[u8; 3]>)] {
        &self.entries
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|(_, rgb)| rgb.is_some())
    }

    /// The table as a palette, if every slot has a color.
    pub fn to_palette(&self) -> Option<Palette> {
        self.entries.iter().map(|&(c, rgb)| rgb.map(|rgb| (c, rgb))).collect()
    }

    pub fn to_rust(&self) -> String {
        let mut output = String::new();

        for (i, (c, rgb)) in self.entries.iter().enumerate() {
            match rgb {
                Some([r, g, b]) => output.push_str(&format!("({:?}, [{}, {}, {}])", c, r, g, b)),
                None => output.push_str(&format!("({:?}, [, , ])", c)),
            }

            if i + 1 < self.entries.len() {
                output.push(',');
            }

            output.push('\n');
        }

        output
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let map: BTreeMap<char, Option<[u8; 3]>> = self.entries.iter().copied().collect();

        serde_json::to_string_pretty(&map)
    }

    pub fn render(&self, format: Format) -> Result<String, serde_json::Error> {
        match format {
            Format::Rust => Ok(self.to_rust()),
            Format::Json => self.to_json(),
        }
    }
}
