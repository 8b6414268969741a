//! Rate-limited delivery decorator

use async_trait::async_trait;
use std::sync::Arc;

use vg_shared::utils::email::mask_destination;

use crate::errors::{CodeError, DomainResult};

use super::traits::{DeliverMessage, RateLimiter};

/// Puts a sliding-window limiter in front of a gateway
///
/// Used for deliveries that do not go through `CodeService`, which runs
/// its own admission check.
pub struct RateLimitedDelivery<L: RateLimiter, D: DeliverMessage> {
    limiter: Arc<L>,
    inner: Arc<D>,
    key: String,
}

impl<L: RateLimiter, D: DeliverMessage> RateLimitedDelivery<L, D> {
    pub fn new(limiter: Arc<L>, inner: Arc<D>, key: impl Into<String>) -> Self {
        Self {
            limiter,
            inner,
            key: key.into(),
        }
    }
}

#[async_trait]
impl<L: RateLimiter, D: DeliverMessage> DeliverMessage for RateLimitedDelivery<L, D> {
    async fn deliver(&self, template_id: &str, args: &[String], destination: &str) -> DomainResult<()> {
        if !self.limiter.admit(&self.key).await? {
            tracing::warn!(
                destination = %mask_destination(destination),
                limiter_key = %self.key,
                event = "delivery_rate_limited",
                "Delivery rejected by rate limiter"
            );
            return Err(CodeError::RateLimited.into());
        }
        self.inner.deliver(template_id, args, destination).await
    }
}
