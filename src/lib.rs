//! # just-one
//!
//! Rules engine for a cooperative word-guessing party game. Each turn one
//! player guesses a secret word from one-word hints the others provide;
//! colliding hints are discarded before the guess.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `(GameState, Action) -> Result<GameState, EngineError>`.
//!    The engine never mutates a state it was given.
//!
//! 2. **Closed phases**: the handler for a state is picked by an exhaustive
//!    match on [`PhaseKind`]. Adding a phase is a compile error until every
//!    dispatcher handles it.
//!
//! 3. **Injectable randomness**: the only random choice (the first guesser)
//!    draws from an [`IndexSource`] the caller passes in, so tests script
//!    it. The engine itself holds no mutable state.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so every
//!   transition produces a fresh state cheaply.
//!
//! - **Accumulated errors**: validation reports every violated rule, not the
//!   first one.
//!
//! ## Modules
//!
//! - `core`: players, actions, turns, state, RNG, configuration
//! - `errors`: error codes and failure kinds
//! - `rules`: action compiler, phase handlers, engine
//! - `service`: validation, storage, the game-state and game-config services

pub mod core;
pub mod errors;
pub mod rules;
pub mod service;

// Re-export commonly used types
pub use crate::core::{
    Action, EngineConfig, FixedIndices, GameRng, GameState, GameStatus, IndexSource, Payload,
    PayloadType, Player, PlayerId, PlayerRole, PlayerWord, Turn, TurnAction, TurnPhase,
    TurnPlayer, TurnRole, ROOT_PLAYER_ID,
};

pub use crate::errors::{EngineError, ErrorCode, ErrorCodes, FailureKind};

pub use crate::rules::{ActionCompiler, DefaultActionCompiler, Engine, PhaseKind};

pub use crate::service::{
    ActionRequest, CreateConfigRequest, CreateStateRequest, ErrorReport, GameConfig,
    GameConfigRepository, GameConfigService, GameRepository, GameStateService,
    InMemoryGameConfigRepository, InMemoryGameRepository, RepositoryError, ServiceError,
};
