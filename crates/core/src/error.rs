//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (validation, parsing).
/// Remote-collaborator failures are `CollaboratorError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// Failure of a call to a remote collaborator (entity backend, analytics
/// backend, dispatch service).
///
/// Every remote seam in this workspace fails with this type; what the failure
/// *means* for the caller (fatal refresh, absent field, failed workflow step)
/// is decided by the owning component, not here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collaborator could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The collaborator answered with a non-success status.
    #[error("collaborator returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The collaborator's response could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl CollaboratorError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
