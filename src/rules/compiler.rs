//! Action compiler: payload shape validation.
//!
//! Runs before anything else in `execute`. It only checks shape, never
//! authorization or phase:
//! - the runtime payload must match the declared payload type
//! - the declared payload type must match what the action kind expects
//!
//! Both checks run; a single action can fail both.

use crate::core::{Action, Payload, PayloadType};
use crate::errors::{EngineError, ErrorCode, ErrorCodes, Result};

/// Validates the shape of inbound actions.
pub trait ActionCompiler: Send + Sync {
    /// Return the action unchanged if well formed.
    ///
    /// Failures are always `EngineError::InvalidAction`.
    fn compile(&self, action: Action) -> Result<Action>;
}

/// The stock compiler.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultActionCompiler;

impl ActionCompiler for DefaultActionCompiler {
    fn compile(&self, action: Action) -> Result<Action> {
        let mut errors = ErrorCodes::new();

        let void_without_payload =
            action.payload == Payload::None && action.payload_type == PayloadType::Void;
        if !void_without_payload && !action.payload.is_instance_of(action.payload_type) {
            errors.push(ErrorCode::PayloadTypeMismatch);
        }
        if action.payload_type != action.kind.expected_payload() {
            errors.push(ErrorCode::InvalidPayload);
        }

        if errors.is_empty() {
            Ok(action)
        } else {
            Err(EngineError::InvalidAction(errors))
        }
    }
}
