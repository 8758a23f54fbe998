//! Game state: the root aggregate replaced on every transition.
//!
//! ## Immutability
//!
//! `GameState` is a value. Handlers never mutate a state they were given;
//! they build the next one with the `with_*` helpers. Collections are `im`
//! persistent vectors, so a copy shares structure with its origin and costs
//! O(1) to produce.
//!
//! ## current_turn
//!
//! `current_turn` is signed. A well-formed in-progress game with turns has
//! `0 <= current_turn < turns.len()`; anything else is corruption that the
//! engine detects and reports rather than repairs.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};
use super::turn::Turn;

/// Lifecycle status. `Cancelled` and `Concluded` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Cancelled,
    Concluded,
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Caller-assigned id, immutable after creation.
    pub id: String,

    pub status: GameStatus,

    /// Ordered roster; order drives role rotation.
    pub players: Vector<Player>,

    /// Append-only except for the turn in progress.
    pub turns: Vector<Turn>,

    /// One secret word per turn.
    pub words_to_guess: Vector<String>,

    /// Index into `turns` and `words_to_guess`.
    pub current_turn: i64,
}

impl GameState {
    /// Create a state with no turns played yet.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        players: Vector<Player>,
        words_to_guess: Vector<String>,
    ) -> Self {
        Self {
            id: id.into(),
            status: GameStatus::InProgress,
            players,
            turns: Vector::new(),
            words_to_guess,
            current_turn: 0,
        }
    }

    // === Roster ===

    /// The host, if the roster has one.
    #[must_use]
    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_host())
    }

    #[must_use]
    pub fn is_host(&self, player_id: &PlayerId) -> bool {
        self.host().is_some_and(|host| &host.id == player_id)
    }

    /// Host-restricted actions accept the host or root.
    #[must_use]
    pub fn is_host_or_root(&self, player_id: &PlayerId) -> bool {
        player_id.is_root() || self.is_host(player_id)
    }

    #[must_use]
    pub fn is_member(&self, player_id: &PlayerId) -> bool {
        self.player_index(player_id).is_some()
    }

    #[must_use]
    pub fn player_index(&self, player_id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == player_id)
    }

    // === Turns ===

    /// `current_turn` as an index, if it points at an existing turn.
    #[must_use]
    pub fn current_turn_index(&self) -> Option<usize> {
        usize::try_from(self.current_turn)
            .ok()
            .filter(|&index| index < self.turns.len())
    }

    /// The turn in progress, if `current_turn` points at one.
    #[must_use]
    pub fn current(&self) -> Option<&Turn> {
        self.current_turn_index().and_then(|index| self.turns.get(index))
    }

    /// Whether another word remains after the current one.
    #[must_use]
    pub fn has_more_words(&self) -> bool {
        let last = self.words_to_guess.len() as i64 - 1;
        self.current_turn < last
    }

    // === Copy-with ===

    #[must_use]
    pub fn with_status(self, status: GameStatus) -> Self {
        Self { status, ..self }
    }

    #[must_use]
    pub fn with_players(self, players: Vector<Player>) -> Self {
        Self { players, ..self }
    }

    #[must_use]
    pub fn with_turns(self, turns: Vector<Turn>) -> Self {
        Self { turns, ..self }
    }

    #[must_use]
    pub fn with_current_turn(self, current_turn: i64) -> Self {
        Self {
            current_turn,
            ..self
        }
    }

    /// Replace the turn in progress.
    ///
    /// Returns the state unchanged if `current_turn` does not point at a turn.
    #[must_use]
    pub fn replace_current(self, turn: Turn) -> Self {
        match self.current_turn_index() {
            Some(index) => {
                let turns = self.turns.update(index, turn);
                self.with_turns(turns)
            }
            None => self,
        }
    }
}
