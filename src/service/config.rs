//! Per-game configuration: who hosts, which language, which word packs.
//!
//! Configs live beside game states, keyed by the same game id, but are
//! plain values with no rules of their own. Create refuses a taken id;
//! update only replaces a config that exists.

use std::sync::RwLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::{RepositoryError, Result, ServiceError};
use super::validation;

/// Settings chosen for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub game_id: String,
    pub host: String,
    pub language_id: String,
    pub word_pack_names: Vec<String>,
}

/// Body of a create call. The id comes from the address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateConfigRequest {
    pub host: String,
    pub language_id: String,
    pub word_pack_names: Vec<String>,
}

/// Id-keyed config storage.
pub trait GameConfigRepository: Send + Sync {
    fn find_by_id(&self, id: &str) -> std::result::Result<Option<GameConfig>, RepositoryError>;

    /// Store `config` unless its id is taken. Returns whether it was stored.
    fn insert(&self, config: &GameConfig) -> std::result::Result<bool, RepositoryError>;

    /// Overwrite the config under `config.game_id` if there is one.
    /// Returns whether it was replaced.
    fn replace(&self, config: &GameConfig) -> std::result::Result<bool, RepositoryError>;

    fn delete(&self, id: &str) -> std::result::Result<Option<GameConfig>, RepositoryError>;

    /// Every stored config, sorted by id.
    fn all(&self) -> std::result::Result<Vec<GameConfig>, RepositoryError>;
}

/// In-memory config store.
#[derive(Debug, Default)]
pub struct InMemoryGameConfigRepository {
    configs: RwLock<FxHashMap<String, GameConfig>>,
}

impl InMemoryGameConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameConfigRepository for InMemoryGameConfigRepository {
    fn find_by_id(&self, id: &str) -> std::result::Result<Option<GameConfig>, RepositoryError> {
        let configs = self.configs.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(configs.get(id).cloned())
    }

    fn insert(&self, config: &GameConfig) -> std::result::Result<bool, RepositoryError> {
        let mut configs = self.configs.write().map_err(|_| RepositoryError::LockPoisoned)?;
        if configs.contains_key(&config.game_id) {
            return Ok(false);
        }
        configs.insert(config.game_id.clone(), config.clone());
        Ok(true)
    }

    fn replace(&self, config: &GameConfig) -> std::result::Result<bool, RepositoryError> {
        let mut configs = self.configs.write().map_err(|_| RepositoryError::LockPoisoned)?;
        match configs.get_mut(&config.game_id) {
            Some(stored) => {
                *stored = config.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: &str) -> std::result::Result<Option<GameConfig>, RepositoryError> {
        let mut configs = self.configs.write().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(configs.remove(id))
    }

    fn all(&self) -> std::result::Result<Vec<GameConfig>, RepositoryError> {
        let configs = self.configs.read().map_err(|_| RepositoryError::LockPoisoned)?;
        let mut all: Vec<GameConfig> = configs.values().cloned().collect();
        all.sort_unstable_by(|a, b| a.game_id.cmp(&b.game_id));
        Ok(all)
    }
}

/// Create, read, update and delete game configs.
#[derive(Debug)]
pub struct GameConfigService<R> {
    repository: R,
}

impl<R: GameConfigRepository> GameConfigService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create the config for `game_id`. Fails with
    /// [`ServiceError::Conflict`] if the game already has one.
    pub fn create_game_config(
        &self,
        game_id: &str,
        request: CreateConfigRequest,
    ) -> Result<GameConfig> {
        let config = validation::validate_create_config_request(game_id, request)?;
        if !self.repository.insert(&config)? {
            tracing::debug!(game_id = %config.game_id, "config already exists");
            return Err(ServiceError::Conflict {
                entity: "GameConfig",
                id: config.game_id,
            });
        }

        tracing::info!(
            game_id = %config.game_id,
            language = %config.language_id,
            "created game config"
        );
        Ok(config)
    }

    pub fn get_game_config(&self, game_id: &str) -> Result<Option<GameConfig>> {
        Ok(self.repository.find_by_id(game_id)?)
    }

    /// Replace the config for `game_id` with `config`.
    ///
    /// Returns `Ok(None)` if `game_id` has no config. The body's own id
    /// must equal `game_id`, else [`ServiceError::IdMismatch`].
    pub fn update_game_config(
        &self,
        game_id: &str,
        config: GameConfig,
    ) -> Result<Option<GameConfig>> {
        let config = validation::validate_game_config(config)?;
        if config.game_id != game_id {
            return Err(ServiceError::IdMismatch {
                resource_id: game_id.to_string(),
                entity_id: config.game_id,
            });
        }
        if !self.repository.replace(&config)? {
            return Ok(None);
        }

        tracing::debug!(game_id, "updated game config");
        Ok(Some(config))
    }

    /// Delete a config, returning it.
    pub fn delete_game_config(&self, game_id: &str) -> Result<Option<GameConfig>> {
        let removed = self.repository.delete(game_id)?;
        if removed.is_some() {
            tracing::info!(game_id, "deleted game config");
        }
        Ok(removed)
    }

    /// Every config, sorted by game id.
    pub fn game_configs(&self) -> Result<Vec<GameConfig>> {
        Ok(self.repository.all()?)
    }

    pub fn game_config_ids(&self) -> Result<Vec<String>> {
        Ok(self.game_configs()?.into_iter().map(|config| config.game_id).collect())
    }
}
