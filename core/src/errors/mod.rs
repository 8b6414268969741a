//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, CodeError, StoreError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Generic rejection used where no more specific reason may be disclosed
    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Code(#[from] CodeError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Throttling outcomes are ordinary results for the caller to relay
    pub fn is_throttled(&self) -> bool {
        matches!(
            self,
            DomainError::Code(
                CodeError::RateLimited | CodeError::SendTooFrequent | CodeError::VerifyTooFrequent
            )
        )
    }

    /// Backing store or limiter could not be reached in time
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DomainError::Store(
                StoreError::LimiterUnavailable { .. } | StoreError::StoreUnavailable { .. }
            )
        )
    }

    /// Any access-token rejection, including the generic fallback
    pub fn is_token_rejection(&self) -> bool {
        matches!(self, DomainError::Token(_) | DomainError::Unauthorized)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
