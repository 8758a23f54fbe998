//! Core data model: players, actions, turns, state, RNG, configuration.
//!
//! Everything here is plain data plus small query helpers. Game rules live
//! in `rules`; this module never decides whether an action is allowed.

pub mod player;
pub mod action;
pub mod turn;
pub mod state;
pub mod rng;
pub mod config;

pub use player::{Player, PlayerId, PlayerRole, ROOT_PLAYER_ID};
pub use action::{Action, Payload, PayloadType, TurnAction};
pub use turn::{PlayerWord, Turn, TurnPhase, TurnPlayer, TurnRole};
pub use state::{GameState, GameStatus};
pub use rng::{FixedIndices, GameRng, IndexSource};
pub use config::EngineConfig;
