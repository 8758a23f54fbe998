//! Action representation: actor + kind + payload.
//!
//! Actions are commands, constructed fresh per request. Each action kind
//! dictates the payload shape it expects:
//! - "Proceed", "CancelGame", "CancelProvidedHint" = no payload
//! - every other kind = a text payload (a hint, a guess, a player id)
//!
//! The declared `payload_type` and the runtime `payload` are stored
//! separately so the action compiler can catch the two disagreeing.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Every command a player can send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnAction {
    ProvideHint,
    CancelProvidedHint,
    GuessWord,
    RemoveHint,
    CancelRemovedHint,
    AdmitPlayer,
    KickPlayer,
    Proceed,
    CancelGame,
}

impl TurnAction {
    /// The payload type this kind of action must declare.
    #[must_use]
    pub const fn expected_payload(self) -> PayloadType {
        match self {
            TurnAction::Proceed | TurnAction::CancelGame | TurnAction::CancelProvidedHint => {
                PayloadType::Void
            }
            TurnAction::ProvideHint
            | TurnAction::GuessWord
            | TurnAction::RemoveHint
            | TurnAction::CancelRemovedHint
            | TurnAction::AdmitPlayer
            | TurnAction::KickPlayer => PayloadType::Text,
        }
    }
}

/// Declared payload type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadType {
    /// No payload.
    Void,
    /// A string payload.
    Text,
}

/// Runtime payload value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Payload {
    None,
    Text(String),
}

impl Payload {
    /// Whether this value is an instance of the declared type.
    ///
    /// Nothing is an instance of `Void`, not even `None`.
    #[must_use]
    pub fn is_instance_of(&self, payload_type: PayloadType) -> bool {
        matches!((self, payload_type), (Payload::Text(_), PayloadType::Text))
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Payload::None)
    }
}

/// A complete player command.
///
/// ## Example
///
/// ```
/// use just_one::core::{Action, PayloadType, TurnAction};
///
/// // Proceed carries nothing
/// let proceed = Action::new("host", TurnAction::Proceed);
/// assert_eq!(proceed.payload_type, PayloadType::Void);
///
/// // A hint carries its word
/// let hint = Action::with_text("alice", TurnAction::ProvideHint, "river");
/// assert_eq!(hint.text(), Some("river"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// The acting player.
    pub player_id: PlayerId,

    /// What the player wants to do.
    pub kind: TurnAction,

    /// Declared payload type.
    pub payload_type: PayloadType,

    /// Runtime payload.
    pub payload: Payload,
}

impl Action {
    /// Create an action with no payload.
    #[must_use]
    pub fn new(player_id: impl Into<PlayerId>, kind: TurnAction) -> Self {
        Self {
            player_id: player_id.into(),
            kind,
            payload_type: PayloadType::Void,
            payload: Payload::None,
        }
    }

    /// Create an action with a text payload.
    #[must_use]
    pub fn with_text(
        player_id: impl Into<PlayerId>,
        kind: TurnAction,
        text: impl Into<String>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            kind,
            payload_type: PayloadType::Text,
            payload: Payload::Text(text.into()),
        }
    }

    /// Create an action with an arbitrary declared type and payload.
    ///
    /// No consistency is enforced here; that is the compiler's job.
    #[must_use]
    pub fn raw(
        player_id: impl Into<PlayerId>,
        kind: TurnAction,
        payload_type: PayloadType,
        payload: Payload,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            kind,
            payload_type,
            payload,
        }
    }

    /// The text payload, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text),
            Payload::None => None,
        }
    }
}
