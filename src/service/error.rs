//! Errors raised by the service layer, and their client-facing reports.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{EngineError, ErrorCode};

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("game repository lock was poisoned")]
    LockPoisoned,

    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Errors surfaced by [`GameStateService`](super::GameStateService) and
/// [`GameConfigService`](super::GameConfigService).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// One message per rejected request field.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    InvalidRequest(String),

    /// Create under an id that is already taken.
    #[error("{entity} with id='{id}' already exists")]
    Conflict { entity: &'static str, id: String },

    /// The id in the body disagrees with the id it was addressed by.
    #[error("resource id='{resource_id}' does not match entity id='{entity_id}'")]
    IdMismatch { resource_id: String, entity_id: String },
}

impl ServiceError {
    /// Whether the caller can fix this by changing the request.
    ///
    /// Engine errors count only when every code is in the `4xxxxx` class;
    /// corrupt-state codes are not the caller's fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            ServiceError::Engine(err) => err.is_client_error(),
            ServiceError::Validation(_)
            | ServiceError::InvalidRequest(_)
            | ServiceError::Conflict { .. }
            | ServiceError::IdMismatch { .. } => true,
            ServiceError::Repository(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Serializable error body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub messages: Vec<String>,
    pub error_codes: Vec<u32>,
}

impl ErrorReport {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
            error_codes: Vec::new(),
        }
    }
}

impl From<&ServiceError> for ErrorReport {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::Engine(engine) => Self {
                messages: vec![engine.to_string()],
                error_codes: engine.codes().iter().map(|code| code.code()).collect(),
            },
            ServiceError::Validation(messages) => Self {
                messages: messages.clone(),
                error_codes: Vec::new(),
            },
            ServiceError::InvalidRequest(message) => Self::message(message.clone()),
            ServiceError::Conflict { .. } | ServiceError::IdMismatch { .. } => {
                Self::message(err.to_string())
            }
            ServiceError::Repository(repository) => Self {
                messages: vec![format!("unhandled error with message='{repository}'")],
                error_codes: vec![ErrorCode::Unknown.code()],
            },
        }
    }
}
