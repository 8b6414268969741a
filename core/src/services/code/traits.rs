//! Capability traits the code service is composed from

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Sliding-window admission check over a keyed counter store
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Decide and record one event for `key` in a single atomic step
    ///
    /// Returns `Ok(false)` when the window is full. Store failures surface
    /// as `StoreError::LimiterUnavailable`.
    async fn admit(&self, key: &str) -> DomainResult<bool>;
}

/// Atomic issue/verify of one short numeric code per (business context, destination)
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Generate and store a fresh code
    ///
    /// Fails with `CodeError::SendTooFrequent` while the previous code is
    /// inside its cooldown; nothing is overwritten in that case.
    async fn issue_code(&self, biz: &str, destination: &str) -> DomainResult<String>;

    /// Spend one attempt and compare
    ///
    /// Returns `Ok(false)` for a wrong code or a missing record and
    /// `CodeError::VerifyTooFrequent` once attempts are exhausted.
    async fn check_code(&self, biz: &str, destination: &str, candidate: &str) -> DomainResult<bool>;
}

/// Message gateway (SMS, e-mail)
#[async_trait]
pub trait DeliverMessage: Send + Sync {
    /// Send a templated message
    ///
    /// # Arguments
    ///
    /// * `template_id` - Provider template identifier
    /// * `args` - Positional template arguments
    /// * `destination` - Phone number or e-mail address
    async fn deliver(&self, template_id: &str, args: &[String], destination: &str) -> DomainResult<()>;
}
