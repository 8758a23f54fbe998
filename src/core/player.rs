//! Player identification and game roster entries.
//!
//! ## PlayerId
//!
//! Opaque string identifier assigned by the caller. The engine never
//! generates ids.
//!
//! ## Root
//!
//! `"root"` is a privileged synthetic actor. It may act anywhere the host
//! may act, without being part of the roster.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Id of the privileged system actor.
pub const ROOT_PLAYER_ID: &str = "root";

/// Player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The privileged system actor.
    #[must_use]
    pub fn root() -> Self {
        Self(ROOT_PLAYER_ID.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_PLAYER_ID
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PlayerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PlayerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Game-level role. Exactly one `Host` exists in a non-empty roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Host,
    Player,
}

/// A roster entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub role: PlayerRole,
}

impl Player {
    /// Create a non-host roster entry.
    #[must_use]
    pub fn player(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            role: PlayerRole::Player,
        }
    }

    /// Create the host roster entry.
    #[must_use]
    pub fn host(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            role: PlayerRole::Host,
        }
    }

    #[must_use]
    pub fn is_host(&self) -> bool {
        self.role == PlayerRole::Host
    }

    /// Same player, promoted to host.
    #[must_use]
    pub fn promoted(self) -> Self {
        Self {
            role: PlayerRole::Host,
            ..self
        }
    }
}
