//! Redis-based sliding-window rate limiter
//!
//! Admitted events live in a sorted set scored by their admission time in
//! milliseconds. Pruning, counting and recording happen in one Lua script,
//! so concurrent callers can never push the window past its threshold.

use async_trait::async_trait;
use chrono::Utc;
use redis::Script;
use tracing::{error, warn};
use uuid::Uuid;

use vg_core::domain::entities::rate_window::RateWindow;
use vg_core::errors::{DomainResult, StoreError};
use vg_core::services::RateLimiter;
use vg_shared::config::SlidingWindowConfig;

use crate::cache::redis_client::RedisClient;

const SLIDING_WINDOW_SCRIPT: &str = include_str!("../../cache/lua/sliding_window.lua");

/// Redis-based implementation of the rate limiter trait
pub struct RedisSlidingWindowLimiter {
    redis_client: RedisClient,
    window: RateWindow,
    script: Script,
}

impl RedisSlidingWindowLimiter {
    /// Create a limiter with the window and threshold from `config`
    ///
    /// The key passed to `admit` selects the counter; `config.key` is only
    /// the default used by the code service.
    pub fn new(redis_client: RedisClient, config: &SlidingWindowConfig) -> Self {
        Self {
            redis_client,
            window: RateWindow::from(config),
            script: Script::new(SLIDING_WINDOW_SCRIPT),
        }
    }

    pub fn window(&self) -> &RateWindow {
        &self.window
    }

    /// Admit an event stamped `now` (unix milliseconds)
    pub async fn admit_at(&self, key: &str, now: i64) -> DomainResult<bool> {
        let keys = vec![self.redis_client.key(&format!("ratelimit:{}", key))];
        let args = vec![
            self.window.window_ms().to_string(),
            self.window.threshold.to_string(),
            now.to_string(),
            format!("{}:{}", now, Uuid::new_v4()),
        ];

        let admitted: i64 = self
            .redis_client
            .eval_script(&self.script, &keys, &args)
            .await
            .map_err(|e| {
                error!(event = "limiter_unavailable", key = %key, error = %e, "Rate limiter call failed");
                StoreError::LimiterUnavailable { message: e.to_string() }
            })?;

        if admitted != 1 {
            warn!(
                event = "rate_limited",
                key = %key,
                window_ms = self.window.window_ms(),
                threshold = self.window.threshold,
                "Sliding window full"
            );
        }
        Ok(admitted == 1)
    }
}

#[async_trait]
impl RateLimiter for RedisSlidingWindowLimiter {
    async fn admit(&self, key: &str) -> DomainResult<bool> {
        self.admit_at(key, Utc::now().timestamp_millis()).await
    }
}
