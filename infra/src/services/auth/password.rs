//! Bcrypt password hashing

use async_trait::async_trait;

use vg_core::errors::{DomainError, DomainResult};
use vg_core::services::PasswordHasher;

/// Bcrypt hasher; hashing runs on the blocking pool
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal { message: format!("Hashing task failed: {}", e) })?
            .map_err(|e| DomainError::Internal { message: format!("Password hashing failed: {}", e) })
    }

    async fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal { message: format!("Hashing task failed: {}", e) })?;

        // A malformed stored hash never matches
        Ok(verified.unwrap_or(false))
    }
}
