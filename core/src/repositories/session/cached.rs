//! Local cache in front of a session registry.
//!
//! Only positive answers are cached, so a revocation made through this
//! decorator is visible immediately and one made elsewhere is visible
//! after at most one cache TTL.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::entities::session::Session;
use crate::errors::DomainResult;

use super::r#trait::SessionRegistry;

/// Session registry decorator caching `is_active == true` answers
pub struct CachedSessionRegistry<R: SessionRegistry> {
    inner: R,
    ttl: Duration,
    active: RwLock<HashMap<String, Instant>>,
}

impl<R: SessionRegistry> CachedSessionRegistry<R> {
    /// Wraps a registry
    ///
    /// # Arguments
    ///
    /// * `inner` - Authoritative registry
    /// * `ttl` - How long a positive answer is trusted
    /// * `access_ttl` - Access-token lifetime, upper bound for `ttl`
    pub fn new(inner: R, ttl: Duration, access_ttl: Duration) -> Self {
        Self {
            inner,
            ttl: ttl.min(access_ttl),
            active: RwLock::new(HashMap::new()),
        }
    }

    /// Effective cache TTL after clamping
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: SessionRegistry> SessionRegistry for CachedSessionRegistry<R> {
    async fn register(&self, session: &Session) -> DomainResult<()> {
        self.inner.register(session).await
    }

    async fn revoke(&self, session_id: &str) -> DomainResult<()> {
        self.active.write().await.remove(session_id);
        self.inner.revoke(session_id).await
    }

    async fn is_active(&self, session_id: &str) -> DomainResult<bool> {
        if self.ttl.is_zero() {
            return self.inner.is_active(session_id).await;
        }

        let now = Instant::now();
        if let Some(expires_at) = self.active.read().await.get(session_id) {
            if *expires_at > now {
                return Ok(true);
            }
        }

        let alive = self.inner.is_active(session_id).await?;
        let mut cache = self.active.write().await;
        if alive {
            cache.insert(session_id.to_string(), now + self.ttl);
        } else {
            cache.remove(session_id);
        }
        cache.retain(|_, expires_at| *expires_at > now);
        Ok(alive)
    }
}
