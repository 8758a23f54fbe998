//! Init phase: the host starts the game.

use im::Vector;

use crate::core::{Action, GameState, GameStatus, IndexSource, Turn, TurnAction};
use crate::errors::{EngineError, ErrorCode, Result};

use super::assign_roles;

/// Build turn zero with a randomly chosen guesser.
pub(crate) fn handle(
    state: &GameState,
    action: &Action,
    rng: &mut dyn IndexSource,
) -> Result<GameState> {
    if action.kind != TurnAction::Proceed || !state.is_host_or_root(&action.player_id) {
        return Err(EngineError::illegal_action(ErrorCode::IllegalAction));
    }
    if state.players.is_empty() {
        return Err(EngineError::invalid_state(ErrorCode::UnrecognisedState));
    }

    let guesser = rng.next_index(state.players.len());
    let first = Turn::selection(assign_roles(&state.players, guesser));
    tracing::debug!(game_id = %state.id, guesser, "starting first turn");

    Ok(state
        .clone()
        .with_status(GameStatus::InProgress)
        .with_turns(Vector::unit(first))
        .with_current_turn(0))
}
