//! Session configuration.

use super::error::DataError;
use crate::data::GameData;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// Configuration for one play session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Random seed for reproducible sessions (None = entropy)
    pub seed: Option<u64>,

    /// Directory overriding the built-in content files
    pub data_dir: Option<PathBuf>,

    /// Whether the terminal frontend colors its output
    pub color: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            data_dir: None,
            color: true,
        }
    }
}

impl GameConfig {
    /// A fixed-seed config without color, for scripted runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            color: false,
            ..Default::default()
        }
    }

    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    pub fn load_data(&self) -> Result<GameData, DataError> {
        match &self.data_dir {
            Some(dir) => GameData::load_dir(dir),
            None => GameData::builtin(),
        }
    }
}
