//! Session registry trait, the server-side revocation state behind every token pair.

use async_trait::async_trait;

use crate::domain::entities::session::Session;
use crate::errors::DomainResult;

/// Registry of sessions keyed by session id
///
/// Implementations must treat a missing session the same as a revoked one
/// and must make `revoke` idempotent. Store failures surface as
/// `StoreError::StoreUnavailable`.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Record a newly opened session
    ///
    /// # Arguments
    /// * `session` - The active session to persist
    async fn register(&self, session: &Session) -> DomainResult<()>;

    /// Move a session to the terminal `Revoked` state
    ///
    /// # Arguments
    /// * `session_id` - Session to revoke; unknown ids are not an error
    async fn revoke(&self, session_id: &str) -> DomainResult<()>;

    /// Whether a session exists and is still active
    ///
    /// # Returns
    /// * `Ok(true)` - Session active
    /// * `Ok(false)` - Session revoked, expired or never registered
    /// * `Err(DomainError)` - Store unreachable
    async fn is_active(&self, session_id: &str) -> DomainResult<bool>;
}
