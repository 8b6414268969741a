//! Redis-backed user profile cache

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use vg_core::domain::entities::user::User;
use vg_core::errors::{DomainError, DomainResult};
use vg_core::services::UserCache;

use super::redis_client::RedisClient;

/// Profile lifetime in the cache
pub const USER_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// JSON profiles under `user:info:{id}`
pub struct RedisUserCache {
    redis_client: RedisClient,
    ttl: Duration,
}

impl RedisUserCache {
    pub fn new(redis_client: RedisClient) -> Self {
        Self::with_ttl(redis_client, USER_CACHE_TTL)
    }

    pub fn with_ttl(redis_client: RedisClient, ttl: Duration) -> Self {
        Self { redis_client, ttl }
    }

    fn user_key(&self, id: i64) -> String {
        self.redis_client.key(&format!("user:info:{}", id))
    }
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn get(&self, id: i64) -> DomainResult<Option<User>> {
        let Some(raw) = self.redis_client.get(&self.user_key(id)).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                // An unreadable entry is a miss; the next fill overwrites it
                warn!(user_id = id, error = %e, "Discarding malformed cached profile");
                Ok(None)
            }
        }
    }

    async fn set(&self, user: &User) -> DomainResult<()> {
        let raw = serde_json::to_string(&user.without_secrets()).map_err(|e| DomainError::Internal {
            message: format!("Failed to encode profile: {}", e),
        })?;
        self.redis_client
            .set_with_expiry(&self.user_key(user.id), &raw, self.ttl.as_secs())
            .await?;
        Ok(())
    }
}
