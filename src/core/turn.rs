//! Turns: one secret word, its hints, and the per-turn role assignment.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::player::PlayerId;

/// Sub-state of the turn in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Providers submit hints.
    Selection,
    /// The remover strikes hints.
    Removal,
    /// The guesser submits a guess.
    Guessing,
    /// Waiting for the host to move on.
    Conclusion,
}

/// Per-turn role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnRole {
    Guesser,
    Remover,
    Provider,
}

/// A player's roles for one turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnPlayer {
    pub player_id: PlayerId,
    pub roles: SmallVec<[TurnRole; 2]>,
}

impl TurnPlayer {
    #[must_use]
    pub fn guesser(player_id: PlayerId) -> Self {
        Self {
            player_id,
            roles: smallvec![TurnRole::Guesser],
        }
    }

    #[must_use]
    pub fn remover(player_id: PlayerId) -> Self {
        Self {
            player_id,
            roles: smallvec![TurnRole::Remover, TurnRole::Provider],
        }
    }

    #[must_use]
    pub fn provider(player_id: PlayerId) -> Self {
        Self {
            player_id,
            roles: smallvec![TurnRole::Provider],
        }
    }

    #[must_use]
    pub fn has_role(&self, role: TurnRole) -> bool {
        self.roles.contains(&role)
    }
}

/// A word tagged with the player who supplied it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerWord {
    pub player_id: PlayerId,
    pub word: String,
}

impl PlayerWord {
    #[must_use]
    pub fn new(player_id: impl Into<PlayerId>, word: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            word: word.into(),
        }
    }
}

/// One turn of the game.
///
/// `phase` is optional only because stored snapshots can be corrupt; every
/// turn the engine builds has a phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub phase: Option<TurnPhase>,

    /// One entry per provider; a later hint replaces an earlier one.
    pub provided_hints: Vector<PlayerWord>,

    /// Colliding hints, excluded automatically (original spelling kept).
    pub hints_to_filter: Vector<String>,

    /// Hints struck by the remover.
    pub hints_to_remove: Vector<PlayerWord>,

    pub word_guessed: Option<PlayerWord>,

    pub players: Vector<TurnPlayer>,
}

impl Turn {
    /// A fresh turn in `Selection` with no hints.
    #[must_use]
    pub fn selection(players: Vector<TurnPlayer>) -> Self {
        Self {
            phase: Some(TurnPhase::Selection),
            provided_hints: Vector::new(),
            hints_to_filter: Vector::new(),
            hints_to_remove: Vector::new(),
            word_guessed: None,
            players,
        }
    }

    #[must_use]
    pub fn with_phase(self, phase: TurnPhase) -> Self {
        Self {
            phase: Some(phase),
            ..self
        }
    }

    #[must_use]
    pub fn is_in(&self, phase: TurnPhase) -> bool {
        self.phase == Some(phase)
    }

    /// Ids of every turn player holding `role`, in roster order.
    pub fn players_with_role(&self, role: TurnRole) -> impl Iterator<Item = &PlayerId> + '_ {
        self.players
            .iter()
            .filter(move |tp| tp.has_role(role))
            .map(|tp| &tp.player_id)
    }

    #[must_use]
    pub fn has_role(&self, player_id: &PlayerId, role: TurnRole) -> bool {
        self.players
            .iter()
            .any(|tp| &tp.player_id == player_id && tp.has_role(role))
    }

    #[must_use]
    pub fn guesser(&self) -> Option<&PlayerId> {
        self.players_with_role(TurnRole::Guesser).next()
    }

    /// The hint `player_id` has provided this turn, if any.
    #[must_use]
    pub fn hint_of(&self, player_id: &PlayerId) -> Option<&PlayerWord> {
        self.provided_hints.iter().find(|pw| &pw.player_id == player_id)
    }
}
