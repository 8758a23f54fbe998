//! Removal phase: the remover strikes hints before the guess.

use crate::core::{Action, GameState, PlayerWord, Turn, TurnAction, TurnPhase, TurnRole};
use crate::errors::{EngineError, ErrorCode, Result};

use super::{current_turn_in, text_payload};

pub(crate) fn handle(state: &GameState, action: &Action) -> Result<GameState> {
    let turn = current_turn_in(state, TurnPhase::Removal)?;
    if !matches!(
        action.kind,
        TurnAction::RemoveHint | TurnAction::CancelRemovedHint | TurnAction::Proceed
    ) {
        return Err(EngineError::illegal_action(ErrorCode::IllegalAction));
    }
    if !turn.has_role(&action.player_id, TurnRole::Remover) {
        return Err(EngineError::illegal_action(ErrorCode::UnauthorisedAction));
    }

    let next = match action.kind {
        TurnAction::RemoveHint => remove_hint(turn, action)?,
        TurnAction::CancelRemovedHint => cancel_removed_hint(turn, action)?,
        // Collisions left in `hints_to_filter` do not block the guess.
        _ => turn.clone().with_phase(TurnPhase::Guessing),
    };
    Ok(state.clone().replace_current(next))
}

/// Strike `word` unless it was never provided, is already struck, or was
/// filtered as a collision. Each of those is a silent no-op.
fn remove_hint(turn: &Turn, action: &Action) -> Result<Turn> {
    let word = text_payload(action)?;

    let provided = turn.provided_hints.iter().any(|pw| pw.word == word);
    let removed = turn.hints_to_remove.iter().any(|pw| pw.word == word);
    let filtered = turn.hints_to_filter.iter().any(|w| w == word);
    if !provided || removed || filtered {
        return Ok(turn.clone());
    }

    let mut hints_to_remove = turn.hints_to_remove.clone();
    hints_to_remove.push_back(PlayerWord::new(action.player_id.clone(), word));
    Ok(Turn {
        hints_to_remove,
        ..turn.clone()
    })
}

fn cancel_removed_hint(turn: &Turn, action: &Action) -> Result<Turn> {
    let word = text_payload(action)?;
    let hints_to_remove = turn
        .hints_to_remove
        .iter()
        .filter(|pw| pw.word != word)
        .cloned()
        .collect();
    Ok(Turn {
        hints_to_remove,
        ..turn.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use im::Vector;

    /// Removal turn with hints `ice` (p2), `Ice` (p3), `cold` (h); the
    /// first two collide.
    fn state() -> GameState {
        let mut turn = crate::rules::phases::fixtures::turn(TurnPhase::Removal);
        turn.provided_hints = Vector::from(vec![
            PlayerWord::new("p2", "ice"),
            PlayerWord::new("p3", "Ice"),
            PlayerWord::new("h", "cold"),
        ]);
        turn.hints_to_filter = Vector::from(vec!["ice".to_string(), "Ice".to_string()]);
        crate::rules::phases::fixtures::fresh().with_turns(Vector::unit(turn))
    }

    fn remove(word: &str) -> Action {
        Action::with_text("p2", TurnAction::RemoveHint, word)
    }

    #[test]
    fn test_remove_hint_is_idempotent() {
        let once = handle(&state(), &remove("cold")).unwrap();
        let twice = handle(&once, &remove("cold")).unwrap();

        assert_eq!(
            once.turns[0].hints_to_remove,
            Vector::unit(PlayerWord::new("p2", "cold"))
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_filtered_or_unknown_is_noop() {
        let state = state();
        assert_eq!(handle(&state, &remove("ice")).unwrap(), state);
        assert_eq!(handle(&state, &remove("lava")).unwrap(), state);
    }

    #[test]
    fn test_cancel_removed_hint() {
        let removed = handle(&state(), &remove("cold")).unwrap();
        let action = Action::with_text("p2", TurnAction::CancelRemovedHint, "cold");
        let restored = handle(&removed, &action).unwrap();

        assert!(restored.turns[0].hints_to_remove.is_empty());
        assert_eq!(restored, state());
    }

    #[test]
    fn test_proceed_ignores_unresolved_collisions() {
        let next = handle(&state(), &Action::new("p2", TurnAction::Proceed)).unwrap();

        let turn = &next.turns[0];
        assert!(turn.is_in(TurnPhase::Guessing));
        assert_eq!(turn.hints_to_filter.len(), 2);
    }

    #[test]
    fn test_only_remover_may_act() {
        for actor in ["p1", "p3", "h"] {
            let err = handle(&state(), &Action::new(actor, TurnAction::Proceed)).unwrap_err();
            assert_eq!(err, EngineError::illegal_action(ErrorCode::UnauthorisedAction));
        }
    }

    #[test]
    fn test_rejects_hint_submission() {
        let action = Action::with_text("p2", TurnAction::ProvideHint, "late");
        assert_eq!(
            handle(&state(), &action).unwrap_err(),
            EngineError::illegal_action(ErrorCode::IllegalAction)
        );
    }
}
