//! Error taxonomy shared by the engine and its collaborators.
//!
//! ## Codes
//!
//! Every failure carries one or more [`ErrorCode`]s. Codes have stable numeric
//! identifiers grouped HTTP-style:
//!
//! - `4xxxxx`: the caller is at fault (malformed input, rule violation)
//! - `5xxxxx`: the stored state is corrupt or unrecognised
//!
//! ## Failure kinds
//!
//! [`EngineError`] distinguishes three kinds of failure:
//!
//! - `InvalidState`: the state (or the inputs used to build it) is malformed
//! - `InvalidAction`: the action is malformed or cannot be processed
//! - `IllegalAction`: the action is well formed but not allowed right now
//!
//! Codes accumulate: `init` and the action compiler report every violation
//! they find, not just the first one.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// A single, stable failure code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Runtime payload does not match the declared payload type.
    PayloadTypeMismatch,
    /// Declared payload type is wrong for the action kind.
    InvalidPayload,
    NoHost,
    NotEnoughPlayers,
    NoId,
    NotEnoughWords,
    /// Action not allowed in the current phase, or by this player.
    IllegalAction,
    /// Action allowed in the current phase, but not for the actor's role.
    UnauthorisedAction,
    UnrecognisedState,
    /// `current_turn` does not index into `turns`.
    InvalidCurrentTurn,
    /// A phase handler was handed a turn in a different phase.
    UnexpectedTurnPhase,
    Unknown,
}

impl ErrorCode {
    /// All codes, in numeric order.
    pub const ALL: [ErrorCode; 12] = [
        ErrorCode::PayloadTypeMismatch,
        ErrorCode::InvalidPayload,
        ErrorCode::NoHost,
        ErrorCode::NotEnoughPlayers,
        ErrorCode::NoId,
        ErrorCode::NotEnoughWords,
        ErrorCode::IllegalAction,
        ErrorCode::UnauthorisedAction,
        ErrorCode::UnrecognisedState,
        ErrorCode::InvalidCurrentTurn,
        ErrorCode::UnexpectedTurnPhase,
        ErrorCode::Unknown,
    ];

    /// Stable numeric identifier.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            ErrorCode::PayloadTypeMismatch => 400_001,
            ErrorCode::InvalidPayload => 400_002,
            ErrorCode::NoHost => 400_003,
            ErrorCode::NotEnoughPlayers => 400_004,
            ErrorCode::NoId => 400_005,
            ErrorCode::NotEnoughWords => 400_006,
            ErrorCode::IllegalAction => 401_001,
            ErrorCode::UnauthorisedAction => 401_002,
            ErrorCode::UnrecognisedState => 500_001,
            ErrorCode::InvalidCurrentTurn => 500_002,
            ErrorCode::UnexpectedTurnPhase => 500_003,
            ErrorCode::Unknown => 999_999,
        }
    }

    /// Upper-snake-case name, as reported to clients.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::PayloadTypeMismatch => "PAYLOAD_TYPE_MISMATCH",
            ErrorCode::InvalidPayload => "INVALID_PAYLOAD",
            ErrorCode::NoHost => "NO_HOST",
            ErrorCode::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            ErrorCode::NoId => "NO_ID",
            ErrorCode::NotEnoughWords => "NOT_ENOUGH_WORDS",
            ErrorCode::IllegalAction => "ILLEGAL_ACTION",
            ErrorCode::UnauthorisedAction => "UNAUTHORISED_ACTION",
            ErrorCode::UnrecognisedState => "UNRECOGNISED_STATE",
            ErrorCode::InvalidCurrentTurn => "INVALID_CURRENT_TURN",
            ErrorCode::UnexpectedTurnPhase => "UNEXPECTED_TURN_PHASE",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }

    /// True for the `4xxxxx` class.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        self.code() / 100_000 == 4
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of codes carried by a failure.
///
/// Most failures carry a single code; `SmallVec` keeps the common case off
/// the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCodes(SmallVec<[ErrorCode; 4]>);

impl ErrorCodes {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Create a list holding a single code.
    #[must_use]
    pub fn one(code: ErrorCode) -> Self {
        let mut codes = Self::new();
        codes.push(code);
        codes
    }

    pub fn push(&mut self, code: ErrorCode) {
        self.0.push(code);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ErrorCode] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, code: ErrorCode) -> bool {
        self.0.contains(&code)
    }
}

impl FromIterator<ErrorCode> for ErrorCodes {
    fn from_iter<I: IntoIterator<Item = ErrorCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ErrorCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{code}")?;
        }
        Ok(())
    }
}

/// The three failure kinds, without their codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    InvalidState,
    InvalidAction,
    IllegalAction,
}

/// Failure returned by every engine operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// State, or the inputs used to build it, is malformed.
    #[error("invalid state: {0}")]
    InvalidState(ErrorCodes),

    /// Action is malformed or cannot be processed.
    #[error("invalid action: {0}")]
    InvalidAction(ErrorCodes),

    /// Action is well formed but cannot be executed in the current state.
    #[error("illegal action: {0}")]
    IllegalAction(ErrorCodes),
}

impl EngineError {
    #[must_use]
    pub fn invalid_state(code: ErrorCode) -> Self {
        Self::InvalidState(ErrorCodes::one(code))
    }

    #[must_use]
    pub fn invalid_action(code: ErrorCode) -> Self {
        Self::InvalidAction(ErrorCodes::one(code))
    }

    #[must_use]
    pub fn illegal_action(code: ErrorCode) -> Self {
        Self::IllegalAction(ErrorCodes::one(code))
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            EngineError::InvalidState(_) => FailureKind::InvalidState,
            EngineError::InvalidAction(_) => FailureKind::InvalidAction,
            EngineError::IllegalAction(_) => FailureKind::IllegalAction,
        }
    }

    #[must_use]
    pub fn codes(&self) -> &[ErrorCode] {
        match self {
            EngineError::InvalidState(codes)
            | EngineError::InvalidAction(codes)
            | EngineError::IllegalAction(codes) => codes.as_slice(),
        }
    }

    #[must_use]
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.codes().contains(&code)
    }

    /// True when every carried code is in the `4xxxxx` class.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.codes().iter().all(|code| code.is_client_error())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_codes_are_distinct() {
        let numeric: FxHashSet<u32> = ErrorCode::ALL.iter().map(|c| c.code()).collect();
        let names: FxHashSet<&str> = ErrorCode::ALL.iter().map(|c| c.name()).collect();

        assert_eq!(numeric.len(), ErrorCode::ALL.len());
        assert_eq!(names.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_code_classes() {
        assert!(ErrorCode::NoId.is_client_error());
        assert!(ErrorCode::UnauthorisedAction.is_client_error());
        assert!(!ErrorCode::InvalidCurrentTurn.is_client_error());
        assert!(!ErrorCode::Unknown.is_client_error());
    }

    #[test]
    fn test_display_joins_codes() {
        let codes: ErrorCodes = [ErrorCode::NoId, ErrorCode::NoHost].into_iter().collect();
        let err = EngineError::InvalidState(codes);

        assert_eq!(err.to_string(), "invalid state: NO_ID, NO_HOST");
        assert_eq!(err.kind(), FailureKind::InvalidState);
        assert_eq!(err.codes(), &[ErrorCode::NoId, ErrorCode::NoHost]);
    }

    #[test]
    fn test_client_error_requires_all_codes() {
        let mixed: ErrorCodes = [ErrorCode::IllegalAction, ErrorCode::UnrecognisedState]
            .into_iter()
            .collect();

        assert!(EngineError::illegal_action(ErrorCode::IllegalAction).is_client_error());
        assert!(!EngineError::InvalidState(mixed).is_client_error());
    }
}
