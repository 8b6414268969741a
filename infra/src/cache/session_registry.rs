//! Redis-backed session registry
//!
//! Each session is a hash `session:{sid}` with `uid`, `created_at` and
//! `state` fields, expiring together with the refresh token. A missing hash
//! reads as revoked.

use std::time::Duration;

use async_trait::async_trait;
use redis::Script;
use tracing::{debug, error, info};

use vg_core::domain::entities::session::{Session, SessionState};
use vg_core::errors::{DomainError, DomainResult};
use vg_core::repositories::SessionRegistry;

use super::redis_client::RedisClient;

const REVOKE_SESSION_SCRIPT: &str = include_str!("lua/revoke_session.lua");

pub struct RedisSessionRegistry {
    redis_client: RedisClient,
    ttl: Duration,
    revoke_script: Script,
}

impl RedisSessionRegistry {
    /// # Arguments
    /// * `redis_client` - Shared Redis client
    /// * `ttl` - Session lifetime, the refresh-token TTL
    pub fn new(redis_client: RedisClient, ttl: Duration) -> Self {
        Self {
            redis_client,
            ttl,
            revoke_script: Script::new(REVOKE_SESSION_SCRIPT),
        }
    }

    fn session_key(&self, session_id: &str) -> String {
        self.redis_client.key(&format!("session:{}", session_id))
    }
}

#[async_trait]
impl SessionRegistry for RedisSessionRegistry {
    async fn register(&self, session: &Session) -> DomainResult<()> {
        let fields = [
            ("uid", session.user_id.to_string()),
            ("created_at", session.created_at.to_rfc3339()),
            ("state", session.state.to_string()),
        ];

        self.redis_client
            .hset_with_expiry(&self.session_key(&session.session_id), &fields, self.ttl.as_secs())
            .await
            .map_err(|e| {
                error!(event = "session_store_unavailable", operation = "register", error = %e);
                DomainError::from(e)
            })?;

        info!(event = "session_registered", user_id = session.user_id, "Session opened");
        Ok(())
    }

    async fn revoke(&self, session_id: &str) -> DomainResult<()> {
        let existed: i64 = self
            .redis_client
            .eval_script(&self.revoke_script, &[self.session_key(session_id)], &[])
            .await
            .map_err(|e| {
                error!(event = "session_store_unavailable", operation = "revoke", error = %e);
                DomainError::from(e)
            })?;

        info!(event = "session_revoked", known = existed == 1, "Session revoked");
        Ok(())
    }

    async fn is_active(&self, session_id: &str) -> DomainResult<bool> {
        let state = self
            .redis_client
            .hget(&self.session_key(session_id), "state")
            .await
            .map_err(|e| {
                error!(event = "session_store_unavailable", operation = "is_active", error = %e);
                DomainError::from(e)
            })?;

        let active = matches!(state.as_deref().map(str::parse::<SessionState>), Some(Ok(SessionState::Active)));
        debug!(event = "session_checked", active, "Session state read");
        Ok(active)
    }
}
