//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// The identity/profile store is an external collaborator; this trait is
/// the only surface the services depend on.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Find a user by login e-mail
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by E.164 phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user and assign its id
    ///
    /// # Arguments
    /// * `user` - The unsaved user entity
    ///
    /// # Returns
    /// * `Ok(User)` - The saved user with its id set
    /// * `Err(DomainError::Auth(AuthError::DuplicateEmail))` - E-mail already taken
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
