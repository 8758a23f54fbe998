//! Kick: remove a player from the game in any phase.
//!
//! A kicked host hands the role to the next player in the roster. If a turn
//! is in progress it is force-concluded with an administrative guess from
//! `root` and an empty word, and the kicked player leaves its roster. Hints
//! already on the turn are kept. This applies to turns already in
//! `Conclusion` too.

use crate::core::{Action, GameState, PlayerId, PlayerWord, Turn, TurnPhase};
use crate::errors::{EngineError, ErrorCode, Result};

use super::text_payload;

pub(crate) fn handle(state: &GameState, action: &Action, min_players: usize) -> Result<GameState> {
    if !state.is_host_or_root(&action.player_id) {
        return Err(EngineError::illegal_action(ErrorCode::IllegalAction));
    }
    let target = PlayerId::new(text_payload(action)?);
    let Some(index) = state.player_index(&target) else {
        return Ok(state.clone());
    };
    let count = state.players.len();
    if count - 1 < min_players {
        return Err(EngineError::illegal_action(ErrorCode::IllegalAction));
    }

    let mut players = state.players.clone();
    if players[index].is_host() {
        let heir = (index + 1) % count;
        let promoted = players[heir].clone().promoted();
        tracing::debug!(game_id = %state.id, host = %promoted.id, "promoting new host");
        players.set(heir, promoted);
    }
    players.remove(index);

    let next = state.clone().with_players(players);
    let Some(turn) = next.current() else {
        return Ok(next);
    };
    let concluded = force_conclude(turn, &target);
    Ok(next.replace_current(concluded))
}

fn force_conclude(turn: &Turn, target: &PlayerId) -> Turn {
    let players = turn
        .players
        .iter()
        .filter(|tp| &tp.player_id != target)
        .cloned()
        .collect();
    Turn {
        word_guessed: Some(PlayerWord::new(PlayerId::root(), "")),
        players,
        ..turn.clone()
    }
    .with_phase(TurnPhase::Conclusion)
}
