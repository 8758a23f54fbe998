//! Classification of a state into the handler that should process it.

use crate::core::{GameState, TurnPhase};

/// Which handler a state dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// No turn played yet.
    Init,
    Selection,
    Removal,
    Guessing,
    Conclusion,
    /// `current_turn` does not point at a turn.
    InvalidCurrentTurn,
    /// The current turn has no recognisable phase.
    Unknown,
}

impl PhaseKind {
    /// Classify `state`.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        if state.turns.is_empty() && state.current_turn == 0 {
            return PhaseKind::Init;
        }
        let Some(turn) = state.current() else {
            return PhaseKind::InvalidCurrentTurn;
        };
        match turn.phase {
            Some(TurnPhase::Selection) => PhaseKind::Selection,
            Some(TurnPhase::Removal) => PhaseKind::Removal,
            Some(TurnPhase::Guessing) => PhaseKind::Guessing,
            Some(TurnPhase::Conclusion) => PhaseKind::Conclusion,
            None => PhaseKind::Unknown,
        }
    }
}
