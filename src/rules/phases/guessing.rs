//! Guessing phase. The guess is recorded, never scored.

use crate::core::{Action, GameState, PlayerWord, Turn, TurnAction, TurnPhase, TurnRole};
use crate::errors::{EngineError, ErrorCode, Result};

use super::{current_turn_in, text_payload};

pub(crate) fn handle(state: &GameState, action: &Action) -> Result<GameState> {
    let turn = current_turn_in(state, TurnPhase::Guessing)?;
    if action.kind != TurnAction::GuessWord {
        return Err(EngineError::illegal_action(ErrorCode::IllegalAction));
    }
    if !turn.has_role(&action.player_id, TurnRole::Guesser) {
        return Err(EngineError::illegal_action(ErrorCode::UnauthorisedAction));
    }

    let guess = PlayerWord::new(action.player_id.clone(), text_payload(action)?);
    let next = Turn {
        word_guessed: Some(guess),
        ..turn.clone()
    }
    .with_phase(TurnPhase::Conclusion);
    Ok(state.clone().replace_current(next))
}
