//! Conclusion phase: the host moves on to the next word or ends the game.
//!
//! The next guesser is the roster successor of the previous one, so the
//! rotation is deterministic and draws no randomness.

use im::Vector;

use crate::core::{Action, GameState, GameStatus, Turn, TurnAction, TurnPhase};
use crate::errors::{EngineError, ErrorCode, Result};

use super::{assign_roles, current_turn_in};

pub(crate) fn handle(state: &GameState, action: &Action) -> Result<GameState> {
    let turn = current_turn_in(state, TurnPhase::Conclusion)?;
    if action.kind != TurnAction::Proceed {
        return Err(EngineError::illegal_action(ErrorCode::IllegalAction));
    }
    if !state.is_host_or_root(&action.player_id) {
        return Err(EngineError::illegal_action(ErrorCode::UnauthorisedAction));
    }

    let next_turn = state.current_turn + 1;
    if !state.has_more_words() {
        tracing::debug!(game_id = %state.id, "last word played, concluding game");
        return Ok(state
            .clone()
            .with_current_turn(next_turn)
            .with_status(GameStatus::Concluded));
    }

    let guesser = next_guesser(state, turn)?;
    let mut turns: Vector<Turn> = state.turns.clone();
    turns.push_back(Turn::selection(assign_roles(&state.players, guesser)));
    tracing::debug!(game_id = %state.id, turn = next_turn, guesser, "starting next turn");

    Ok(state
        .clone()
        .with_turns(turns)
        .with_current_turn(next_turn))
}

/// Roster index of the player after the previous guesser.
fn next_guesser(state: &GameState, turn: &Turn) -> Result<usize> {
    let previous = turn
        .guesser()
        .and_then(|id| state.player_index(id))
        .ok_or_else(|| EngineError::invalid_state(ErrorCode::UnrecognisedState))?;
    Ok((previous + 1) % state.players.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerId, PlayerWord, TurnRole};
    use crate::rules::phases::fixtures;

    fn proceed(actor: &str) -> Action {
        Action::new(actor, TurnAction::Proceed)
    }

    #[test]
    fn test_rotates_guesser() {
        let next = handle(&fixtures::in_phase(TurnPhase::Conclusion), &proceed("h")).unwrap();

        assert_eq!(next.turns.len(), 2);
        assert_eq!(next.current_turn, 1);
        assert_eq!(next.status, GameStatus::InProgress);

        let turn = &next.turns[1];
        assert!(turn.is_in(TurnPhase::Selection));
        assert_eq!(turn.guesser(), Some(&PlayerId::new("p2")));
        assert!(turn.has_role(&PlayerId::new("p3"), TurnRole::Remover));
        assert!(turn.provided_hints.is_empty());
    }

    #[test]
    fn test_last_word_concludes_game() {
        let mut state = fixtures::in_phase(TurnPhase::Conclusion);
        state.words_to_guess = Vector::unit("w1".to_string());
        let next = handle(&state, &proceed("root")).unwrap();

        assert_eq!(next.status, GameStatus::Concluded);
        assert_eq!(next.current_turn, 1);
        assert_eq!(next.turns.len(), 1);
    }

    #[test]
    fn test_guesser_left_roster() {
        let mut turn = fixtures::turn(TurnPhase::Conclusion);
        turn.players = turn
            .players
            .into_iter()
            .map(|mut tp| {
                if tp.player_id == "p1" {
                    tp.player_id = PlayerId::new("gone");
                }
                tp
            })
            .collect();
        turn.word_guessed = Some(PlayerWord::new("gone", "x"));
        let state = fixtures::fresh().with_turns(Vector::unit(turn));

        assert_eq!(
            handle(&state, &proceed("h")).unwrap_err(),
            EngineError::invalid_state(ErrorCode::UnrecognisedState)
        );
    }

    #[test]
    fn test_non_host_unauthorised() {
        assert_eq!(
            handle(&fixtures::in_phase(TurnPhase::Conclusion), &proceed("p1")).unwrap_err(),
            EngineError::illegal_action(ErrorCode::UnauthorisedAction)
        );
    }
}
