use std::collections::BTreeMap;

use log::debug;

use super::{FloodFill, PerimeterWalk, Puzzle};
use crate::error::PuzzleError;

/// Builds a fresh puzzle instance, loading its own input.
pub type Factory = fn() -> Result<Box<dyn Puzzle>, PuzzleError>;

/// Name to factory table of the available puzzles.
#[derive(Clone, Default)]
pub struct Registry {
    factories: BTreeMap<String, Factory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the puzzles shipped with the crate.
    pub fn builtin() -> Self {
        let mut factories: BTreeMap<String, Factory> = BTreeMap::new();

        factories.insert(PerimeterWalk::NAME.to_string(), PerimeterWalk::factory);
        factories.insert(FloodFill::NAME.to_string(), FloodFill::factory);

        Self { factories }
    }

    pub fn register(&mut self, name: impl Into<String>, factory: Factory) -> Result<(), PuzzleError> {
        let name = name.into();

        if self.factories.contains_key(&name) {
            return Err(PuzzleError::DuplicateName { name });
        }

        debug!("Registered puzzle {}", name);
        self.factories.insert(name, factory);

        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn first(&self) -> Option<&str> {
        self.factories.keys().next().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Puzzle>, PuzzleError> {
        let factory = self.factories.get(name).ok_or_else(|| PuzzleError::NotFound {
            name: name.to_string(),
        })?;

        factory()
    }
}
