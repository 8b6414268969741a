//! Traits for the user cache and password hashing collaborators

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

/// Read-through cache for user profiles
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Cached profile, `None` on a miss
    async fn get(&self, id: i64) -> DomainResult<Option<User>>;

    /// Store a profile with the cache's own TTL
    async fn set(&self, user: &User) -> DomainResult<()>;
}

/// One-way password hash
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> DomainResult<String>;

    /// Whether `password` produces `hash`
    async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}
