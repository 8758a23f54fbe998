//! Game-wide actions: cancel and admit.

use crate::core::{Action, GameState, GameStatus, Player, PlayerId};
use crate::errors::{EngineError, ErrorCode, Result};

use super::text_payload;

/// Cancel the game. Only `status` changes; turns are kept.
pub(crate) fn cancel(state: &GameState, action: &Action) -> Result<GameState> {
    if !state.is_host_or_root(&action.player_id) {
        return Err(EngineError::illegal_action(ErrorCode::IllegalAction));
    }
    Ok(state.clone().with_status(GameStatus::Cancelled))
}

/// Append a new non-host player to the roster.
///
/// Re-admitting an existing player is an `InvalidAction` carrying the
/// `IllegalAction` code.
pub(crate) fn admit(state: &GameState, action: &Action) -> Result<GameState> {
    if !state.is_host_or_root(&action.player_id) {
        return Err(EngineError::illegal_action(ErrorCode::IllegalAction));
    }
    let admitted = PlayerId::new(text_payload(action)?);
    if state.is_member(&admitted) {
        return Err(EngineError::invalid_action(ErrorCode::IllegalAction));
    }

    let mut players = state.players.clone();
    players.push_back(Player::player(admitted));
    Ok(state.clone().with_players(players))
}
