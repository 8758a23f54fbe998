//! Engine configuration.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for role-assignment randomness.
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Fewest players a game may be left with after a kick.
    pub min_players: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            min_players: 2,
        }
    }
}

impl EngineConfig {
    /// Create a new config with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with a custom kick floor.
    #[must_use]
    pub fn with_min_players(mut self, min_players: usize) -> Self {
        self.min_players = min_players;
        self
    }

    /// Build the RNG this config describes.
    #[must_use]
    pub fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }
}
