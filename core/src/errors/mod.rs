//! Domain error taxonomy shared by the token store and the refresh gate.

use thiserror::Error;

/// Core domain errors
///
/// `NotFound` is only raised where a target is required (recording a use,
/// authorizing a bearer token). Lookups report absence as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed request, e.g. a lookup carrying both or neither addressing mode
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Uniqueness violation on issuance; the caller may retry with a new token
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// The relational store or the counter store could not be reached
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    /// Stored data could not be decoded
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DomainError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        DomainError::Unavailable {
            message: message.into(),
        }
    }

    /// Whether retrying the same call later may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::Unavailable { .. } | DomainError::Conflict { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
