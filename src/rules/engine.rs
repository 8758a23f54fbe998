//! The engine: initialization and action dispatch.
//!
//! ## Dispatch order
//!
//! 1. Compile the action (shape only)
//! 2. Authorize: the actor must be in the roster or be `root`
//! 3. Game-wide actions (cancel, admit, kick) run in any phase
//! 4. Everything else goes to the handler for the current [`PhaseKind`]
//!
//! ## Randomness
//!
//! The engine owns no RNG. Callers pass an [`IndexSource`] to `execute`:
//! the service shares one seeded [`GameRng`](crate::core::GameRng), tests
//! script picks with [`FixedIndices`](crate::core::FixedIndices).

use im::Vector;

use crate::core::{Action, EngineConfig, GameState, IndexSource, Player, PlayerId, TurnAction};
use crate::errors::{EngineError, ErrorCode, ErrorCodes, Result};

use super::compiler::{ActionCompiler, DefaultActionCompiler};
use super::phase::PhaseKind;
use super::phases::{admin, conclusion, guessing, init, kick, removal, selection};

/// Rules engine for one deployment. Holds no mutable state.
pub struct Engine {
    config: EngineConfig,
    compiler: Box<dyn ActionCompiler>,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_compiler(config, DefaultActionCompiler)
    }

    /// Create an engine with a custom action compiler.
    #[must_use]
    pub fn with_compiler(config: EngineConfig, compiler: impl ActionCompiler + 'static) -> Self {
        Self {
            config,
            compiler: Box::new(compiler),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the initial state of a game.
    ///
    /// Every violated requirement is reported, not just the first:
    /// blank `id` (`NoId`), blank `host` (`NoHost`), no players
    /// (`NotEnoughPlayers`), no words (`NotEnoughWords`).
    ///
    /// The roster is `players` in order, minus the host, followed by the
    /// host. Listing the host in `players` does not duplicate it.
    pub fn init<P, W>(&self, id: &str, host: &str, players: &[P], words: &[W]) -> Result<GameState>
    where
        P: AsRef<str>,
        W: AsRef<str>,
    {
        let mut errors = ErrorCodes::new();
        if is_blank(id) {
            errors.push(ErrorCode::NoId);
        }
        if is_blank(host) {
            errors.push(ErrorCode::NoHost);
        }
        if players.is_empty() {
            errors.push(ErrorCode::NotEnoughPlayers);
        }
        if words.is_empty() {
            errors.push(ErrorCode::NotEnoughWords);
        }
        if !errors.is_empty() {
            return Err(EngineError::InvalidState(errors));
        }

        let mut roster: Vector<Player> = players
            .iter()
            .map(|player| player.as_ref())
            .filter(|&player| player != host)
            .map(Player::player)
            .collect();
        roster.push_back(Player::host(host));
        let words = words.iter().map(|w| w.as_ref().to_string()).collect();

        tracing::debug!(game_id = id, players = roster.len(), "initialized game");
        Ok(GameState::new(id, roster, words))
    }

    /// Apply `action` to `state`. Only the first `Proceed` draws from `rng`.
    pub fn execute(
        &self,
        state: &GameState,
        action: Action,
        rng: &mut dyn IndexSource,
    ) -> Result<GameState> {
        let action = self.compiler.compile(action)?;
        if !is_authorized(state, &action.player_id) {
            tracing::debug!(game_id = %state.id, player = %action.player_id, "actor not in game");
            return Err(EngineError::illegal_action(ErrorCode::IllegalAction));
        }

        let result = match action.kind {
            TurnAction::CancelGame => admin::cancel(state, &action),
            TurnAction::AdmitPlayer => admin::admit(state, &action),
            TurnAction::KickPlayer => kick::handle(state, &action, self.config.min_players),
            _ => self.dispatch(state, &action, rng),
        };

        match &result {
            Ok(_) => tracing::debug!(
                game_id = %state.id,
                player = %action.player_id,
                action = ?action.kind,
                "action applied"
            ),
            Err(err) => tracing::debug!(
                game_id = %state.id,
                player = %action.player_id,
                action = ?action.kind,
                error = %err,
                "action rejected"
            ),
        }
        result
    }

    fn dispatch(&self, state: &GameState, action: &Action, rng: &mut dyn IndexSource) -> Result<GameState> {
        match PhaseKind::of(state) {
            PhaseKind::Init => init::handle(state, action, rng),
            PhaseKind::Selection => selection::handle(state, action),
            PhaseKind::Removal => removal::handle(state, action),
            PhaseKind::Guessing => guessing::handle(state, action),
            PhaseKind::Conclusion => conclusion::handle(state, action),
            PhaseKind::InvalidCurrentTurn => {
                tracing::warn!(
                    game_id = %state.id,
                    current_turn = state.current_turn,
                    turns = state.turns.len(),
                    "current turn out of range"
                );
                Err(EngineError::invalid_state(ErrorCode::InvalidCurrentTurn))
            }
            PhaseKind::Unknown => {
                tracing::warn!(game_id = %state.id, "current turn has no phase");
                Err(EngineError::invalid_state(ErrorCode::UnrecognisedState))
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_authorized(state: &GameState, player_id: &PlayerId) -> bool {
    player_id.is_root() || state.is_member(player_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedIndices, GameRng, GameStatus, Payload, PayloadType, PlayerRole, TurnPhase};
    use crate::errors::FailureKind;

    fn engine() -> Engine {
        Engine::new(EngineConfig::default().with_seed(7))
    }

    fn game() -> GameState {
        engine().init("g1", "h", &["p1", "p2"], &["w1", "w2"]).unwrap()
    }

    fn execute(state: &GameState, action: Action) -> Result<GameState> {
        engine().execute(state, action, &mut FixedIndices::new([0]))
    }

    #[test]
    fn test_init_builds_roster() {
        let state = game();

        let ids: Vec<_> = state.players.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2", "h"]);
        assert_eq!(state.players[2].role, PlayerRole::Host);
        assert_eq!(state.status, GameStatus::InProgress);
        assert!(state.turns.is_empty());
        assert_eq!(state.current_turn, 0);
    }

    #[test]
    fn test_init_host_listed_once() {
        let state = engine().init("g1", "h", &["h", "p1"], &["w"]).unwrap();

        let ids: Vec<_> = state.players.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "h"]);
        assert_eq!(state.host().map(|p| p.id.as_str()), Some("h"));
    }

    #[test]
    fn test_init_accumulates_errors() {
        let none: [&str; 0] = [];
        let err = engine().init("  ", "", &none, &none).unwrap_err();

        assert_eq!(err.kind(), FailureKind::InvalidState);
        assert_eq!(
            err.codes(),
            [
                ErrorCode::NoId,
                ErrorCode::NoHost,
                ErrorCode::NotEnoughPlayers,
                ErrorCode::NotEnoughWords
            ]
        );
    }

    #[test]
    fn test_compile_runs_first() {
        let action = Action::raw("stranger", TurnAction::Proceed, PayloadType::Text, Payload::None);
        let err = execute(&game(), action).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidAction);
    }

    #[test]
    fn test_outsider_rejected() {
        let err = execute(&game(), Action::new("stranger", TurnAction::Proceed)).unwrap_err();
        assert_eq!(err, EngineError::illegal_action(ErrorCode::IllegalAction));
    }

    #[test]
    fn test_root_can_start() {
        let next = execute(&game(), Action::new("root", TurnAction::Proceed)).unwrap();
        assert!(next.turns[0].is_in(TurnPhase::Selection));
        assert_eq!(next.turns[0].guesser(), Some(&PlayerId::new("p1")));
    }

    #[test]
    fn test_same_seed_same_guesser() {
        let proceed = || Action::new("h", TurnAction::Proceed);
        let a = engine().execute(&game(), proceed(), &mut GameRng::new(11)).unwrap();
        let b = engine().execute(&game(), proceed(), &mut GameRng::new(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_corrupt_current_turn() {
        let state = game().with_current_turn(3);
        let err = execute(&state, Action::new("h", TurnAction::Proceed)).unwrap_err();
        assert_eq!(err, EngineError::invalid_state(ErrorCode::InvalidCurrentTurn));
    }

    #[test]
    fn test_global_actions_skip_phase_dispatch() {
        // Corrupt turn index, but cancel still applies.
        let state = game().with_current_turn(3);
        let next = execute(&state, Action::new("h", TurnAction::CancelGame)).unwrap();
        assert_eq!(next.status, GameStatus::Cancelled);
    }
}
