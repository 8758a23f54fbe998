//! Selection phase: providers submit their hints.
//!
//! Once every provider has a hint, colliding hints are detected and the
//! turn moves to `Removal`. Two hints collide when they are equal after
//! trimming whitespace and lowercasing. Every colliding hint is recorded in
//! `hints_to_filter` with its original spelling, once per distinct spelling.

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{Action, GameState, PlayerWord, Turn, TurnAction, TurnPhase, TurnRole};
use crate::errors::{EngineError, ErrorCode, Result};

use super::{current_turn_in, text_payload};

pub(crate) fn handle(state: &GameState, action: &Action) -> Result<GameState> {
    let turn = current_turn_in(state, TurnPhase::Selection)?;
    if !matches!(action.kind, TurnAction::ProvideHint | TurnAction::CancelProvidedHint) {
        return Err(EngineError::illegal_action(ErrorCode::IllegalAction));
    }
    if !turn.has_role(&action.player_id, TurnRole::Provider) {
        return Err(EngineError::illegal_action(ErrorCode::UnauthorisedAction));
    }

    let next = if action.kind == TurnAction::ProvideHint {
        provide_hint(turn, action)?
    } else {
        cancel_hint(turn, action)
    };
    Ok(state.clone().replace_current(next))
}

fn provide_hint(turn: &Turn, action: &Action) -> Result<Turn> {
    let hint = PlayerWord::new(action.player_id.clone(), text_payload(action)?);

    let mut hints = turn.provided_hints.clone();
    match hints.iter().position(|pw| pw.player_id == action.player_id) {
        Some(index) => {
            hints.set(index, hint);
        }
        None => hints.push_back(hint),
    }

    let next = Turn {
        provided_hints: hints,
        ..turn.clone()
    };
    if !all_providers_submitted(&next) {
        return Ok(next);
    }

    let hints_to_filter = colliding_hints(&next.provided_hints);
    Ok(Turn {
        hints_to_filter,
        ..next
    }
    .with_phase(TurnPhase::Removal))
}

fn cancel_hint(turn: &Turn, action: &Action) -> Turn {
    let provided_hints = turn
        .provided_hints
        .iter()
        .filter(|pw| pw.player_id != action.player_id)
        .cloned()
        .collect();
    Turn {
        provided_hints,
        ..turn.clone()
    }
}

fn all_providers_submitted(turn: &Turn) -> bool {
    turn.players_with_role(TurnRole::Provider)
        .all(|provider| turn.hint_of(provider).is_some())
}

pub(crate) fn normalise(hint: &str) -> String {
    hint.trim().to_lowercase()
}

/// Original spellings of every hint whose normal form occurs more than once.
fn colliding_hints(hints: &Vector<PlayerWord>) -> Vector<String> {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for hint in hints {
        *counts.entry(normalise(&hint.word)).or_default() += 1;
    }

    let mut seen = FxHashSet::default();
    hints
        .iter()
        .filter(|hint| counts.get(&normalise(&hint.word)).copied().unwrap_or(0) > 1)
        .filter(|hint| seen.insert(hint.word.clone()))
        .map(|hint| hint.word.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::rules::phases::fixtures;

    fn hint(player: &str, word: &str) -> Action {
        Action::with_text(player, TurnAction::ProvideHint, word)
    }

    fn apply(state: &GameState, actions: &[Action]) -> GameState {
        actions
            .iter()
            .fold(state.clone(), |s, a| handle(&s, a).unwrap())
    }

    #[test]
    fn test_partial_hints_stay_in_selection() {
        let state = apply(
            &fixtures::in_phase(TurnPhase::Selection),
            &[hint("p2", "ice"), hint("p3", "snow")],
        );

        let turn = &state.turns[0];
        assert!(turn.is_in(TurnPhase::Selection));
        assert_eq!(turn.provided_hints.len(), 2);
        assert!(turn.hints_to_filter.is_empty());
    }

    #[test]
    fn test_hint_replaces_previous() {
        let state = apply(
            &fixtures::in_phase(TurnPhase::Selection),
            &[hint("p2", "ice"), hint("p2", "frost")],
        );

        let turn = &state.turns[0];
        assert_eq!(turn.provided_hints.len(), 1);
        assert_eq!(turn.hint_of(&PlayerId::new("p2")).unwrap().word, "frost");
    }

    #[test]
    fn test_last_hint_moves_to_removal() {
        let state = apply(
            &fixtures::in_phase(TurnPhase::Selection),
            &[hint("p2", "ice"), hint("p3", "snow"), hint("h", "cold")],
        );

        let turn = &state.turns[0];
        assert!(turn.is_in(TurnPhase::Removal));
        assert!(turn.hints_to_filter.is_empty());
    }

    #[test]
    fn test_collisions_are_case_and_whitespace_insensitive() {
        let state = apply(
            &fixtures::in_phase(TurnPhase::Selection),
            &[hint("p2", "foo   "), hint("p3", "  FoO  "), hint("h", "bar")],
        );

        let turn = &state.turns[0];
        assert!(turn.is_in(TurnPhase::Removal));
        assert_eq!(
            turn.hints_to_filter,
            Vector::from(vec!["foo   ".to_string(), "  FoO  ".to_string()])
        );
    }

    #[test]
    fn test_identical_spellings_filtered_once() {
        let state = apply(
            &fixtures::in_phase(TurnPhase::Selection),
            &[hint("p2", "sun"), hint("p3", "sun"), hint("h", "Sun")],
        );

        assert_eq!(
            state.turns[0].hints_to_filter,
            Vector::from(vec!["sun".to_string(), "Sun".to_string()])
        );
    }

    #[test]
    fn test_cancel_removes_own_hint() {
        let state = apply(
            &fixtures::in_phase(TurnPhase::Selection),
            &[hint("p2", "ice"), hint("p3", "snow")],
        );
        let next = handle(&state, &Action::new("p2", TurnAction::CancelProvidedHint)).unwrap();

        let turn = &next.turns[0];
        assert!(turn.hint_of(&PlayerId::new("p2")).is_none());
        assert!(turn.hint_of(&PlayerId::new("p3")).is_some());
        assert!(turn.is_in(TurnPhase::Selection));
    }

    #[test]
    fn test_cancel_without_hint_is_noop() {
        let state = fixtures::in_phase(TurnPhase::Selection);
        let next = handle(&state, &Action::new("h", TurnAction::CancelProvidedHint)).unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_guesser_cannot_provide() {
        let err = handle(&fixtures::in_phase(TurnPhase::Selection), &hint("p1", "x")).unwrap_err();
        assert_eq!(err, EngineError::illegal_action(ErrorCode::UnauthorisedAction));
    }

    #[test]
    fn test_rejects_other_actions() {
        let action = Action::with_text("p2", TurnAction::GuessWord, "x");
        let err = handle(&fixtures::in_phase(TurnPhase::Selection), &action).unwrap_err();
        assert_eq!(err, EngineError::illegal_action(ErrorCode::IllegalAction));
    }

    #[test]
    fn test_wrong_phase() {
        let err = handle(&fixtures::in_phase(TurnPhase::Guessing), &hint("p2", "x")).unwrap_err();
        assert_eq!(err, EngineError::invalid_state(ErrorCode::UnexpectedTurnPhase));
    }

    #[test]
    fn test_normalise() {
        assert_eq!(normalise("  HeLLo \t"), "hello");
    }
}
