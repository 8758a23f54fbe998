//! Per-phase handlers.
//!
//! One module per handler. Each exposes `handle(state, action, ..)` that
//! returns the next state or a failure. Handlers never mutate the state
//! they are given.
//!
//! - `admin`: game-wide cancel and admit, valid in any phase
//! - `kick`: player removal, valid in any phase
//! - `init`: first `Proceed`, builds turn zero
//! - `selection`, `removal`, `guessing`, `conclusion`: one per turn phase

pub(crate) mod admin;
pub(crate) mod conclusion;
pub(crate) mod guessing;
pub(crate) mod init;
pub(crate) mod kick;
pub(crate) mod removal;
pub(crate) mod selection;

use im::Vector;

use crate::core::{Action, GameState, Player, Turn, TurnPhase, TurnPlayer};
use crate::errors::{EngineError, ErrorCode, Result};

/// Assign turn roles anchored at `guesser`.
///
/// `guesser` gets `{Guesser}`, the next player (wrapping) gets
/// `{Remover, Provider}`, everyone else gets `{Provider}`.
pub(crate) fn assign_roles(players: &Vector<Player>, guesser: usize) -> Vector<TurnPlayer> {
    let count = players.len();
    let remover = (guesser + 1) % count;
    players
        .iter()
        .enumerate()
        .map(|(index, player)| {
            let id = player.id.clone();
            if index == guesser {
                TurnPlayer::guesser(id)
            } else if index == remover {
                TurnPlayer::remover(id)
            } else {
                TurnPlayer::provider(id)
            }
        })
        .collect()
}

/// The turn in progress, checked to be in `phase`.
pub(crate) fn current_turn_in(state: &GameState, phase: TurnPhase) -> Result<&Turn> {
    let turn = state
        .current()
        .ok_or_else(|| EngineError::invalid_state(ErrorCode::InvalidCurrentTurn))?;
    if !turn.is_in(phase) {
        return Err(EngineError::invalid_state(ErrorCode::UnexpectedTurnPhase));
    }
    Ok(turn)
}

/// The action's text payload.
///
/// Compiled text actions always carry one; a missing payload means the
/// action skipped compilation.
pub(crate) fn text_payload(action: &Action) -> Result<&str> {
    action
        .text()
        .ok_or_else(|| EngineError::invalid_action(ErrorCode::InvalidPayload))
}
