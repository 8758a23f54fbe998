//! Game-state service: the engine wired to storage.
//!
//! The service owns no rules. It validates requests, shapes them into
//! [`Action`]s, runs the [`Engine`], and stores the result through a
//! [`GameRepository`]. Actions on one game are applied inside
//! [`GameRepository::update`], so they are linearized per game id.
//!
//! The service also owns the RNG the engine draws from. One seeded
//! [`GameRng`] is shared by every game, locked per draw.
//!
//! [`GameConfigService`] keeps each game's settings alongside.

mod config;
mod error;
mod repository;
pub mod validation;

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{Action, GameRng, GameState, IndexSource, PayloadType, TurnAction};
use crate::rules::Engine;

pub use config::{
    CreateConfigRequest, GameConfig, GameConfigRepository, GameConfigService,
    InMemoryGameConfigRepository,
};
pub use error::{ErrorReport, RepositoryError, Result, ServiceError};
pub use repository::{GameRepository, InMemoryGameRepository};

/// Inputs for a new game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStateRequest {
    pub host: String,
    pub players: Vec<String>,
    pub words_to_guess: Vec<String>,
}

/// One player action, as received from a client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub player_id: String,
    pub turn_action: TurnAction,
    #[serde(default)]
    pub payload: Option<Value>,
}

/// Create, read, act on and delete games.
#[derive(Debug)]
pub struct GameStateService<R> {
    engine: Engine,
    repository: R,
    rng: Mutex<GameRng>,
}

impl<R: GameRepository> GameStateService<R> {
    /// Build a service; the RNG is seeded from the engine's config.
    pub fn new(engine: Engine, repository: R) -> Self {
        let rng = Mutex::new(engine.config().rng());
        Self {
            engine,
            repository,
            rng,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a game under `id`, replacing any game already stored there.
    pub fn create_game_state(&self, id: &str, request: CreateStateRequest) -> Result<GameState> {
        let request = validation::validate_create_request(request)?;
        let state = self.engine.init(
            id,
            &request.host,
            &request.players,
            &request.words_to_guess,
        )?;
        self.repository.save(&state)?;

        tracing::info!(game_id = id, players = state.players.len(), "created game");
        Ok(state)
    }

    pub fn get_game_state(&self, id: &str) -> Result<Option<GameState>> {
        Ok(self.repository.find_by_id(id)?)
    }

    /// Apply one action to the stored game.
    ///
    /// Returns `Ok(None)` if no game is stored under `id`. A rejected action
    /// leaves the stored game untouched.
    pub fn execute_action(&self, id: &str, request: ActionRequest) -> Result<Option<GameState>> {
        let request = validation::validate_action_request(request)?;
        let result = self.repository.update(id, |state| {
            let action = shape_action(&request)?;
            let mut rng = SharedRng(&self.rng);
            Ok::<_, ServiceError>(self.engine.execute(state, action, &mut rng)?)
        });

        match &result {
            Ok(Some(_)) => tracing::debug!(
                game_id = id,
                player = %request.player_id,
                action = ?request.turn_action,
                "stored action result"
            ),
            Ok(None) => tracing::debug!(game_id = id, "action for unknown game"),
            Err(err) if err.is_client_error() => tracing::debug!(game_id = id, error = %err, "action refused"),
            Err(err) => tracing::warn!(game_id = id, error = %err, "action failed"),
        }
        result
    }

    /// Delete a game, returning its last state.
    pub fn delete_game_state(&self, id: &str) -> Result<Option<GameState>> {
        let removed = self.repository.delete(id)?;
        if removed.is_some() {
            tracing::info!(game_id = id, "deleted game");
        }
        Ok(removed)
    }

    /// Every stored game, sorted by id.
    pub fn all_game_states(&self) -> Result<Vec<GameState>> {
        Ok(self.repository.all()?)
    }

    /// Ids of every stored game, sorted.
    pub fn game_state_ids(&self) -> Result<Vec<String>> {
        Ok(self.repository.ids()?)
    }
}

/// The service RNG, locked per draw.
struct SharedRng<'a>(&'a Mutex<GameRng>);

impl IndexSource for SharedRng<'_> {
    fn next_index(&mut self, bound: usize) -> usize {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_index(bound)
    }
}

/// Turn a request into an action of the shape its kind expects.
fn shape_action(request: &ActionRequest) -> Result<Action> {
    let player_id = request.player_id.as_str();
    match request.turn_action.expected_payload() {
        PayloadType::Void => Ok(Action::new(player_id, request.turn_action)),
        PayloadType::Text => match &request.payload {
            Some(Value::String(text)) => Ok(Action::with_text(player_id, request.turn_action, text.as_str())),
            other => {
                let got = other.as_ref().map_or_else(|| "null".to_string(), Value::to_string);
                Err(ServiceError::InvalidRequest(format!(
                    "expected a string payload got '{got}' instead"
                )))
            }
        },
    }
}
