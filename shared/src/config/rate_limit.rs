//! Throttling configuration: the delivery-channel sliding window and the
//! per-destination verification-code limits

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_or;

/// What happens to a code after it has been matched once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessPolicy {
    /// The record is consumed; later verifies never match again
    #[default]
    SingleUse,
    /// The code keeps matching until it expires or attempts run out
    ReplayWithinTtl,
}

impl std::str::FromStr for SuccessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single_use" | "single-use" => Ok(SuccessPolicy::SingleUse),
            "replay_within_ttl" | "replay-within-ttl" | "replay" => Ok(SuccessPolicy::ReplayWithinTtl),
            _ => Err(format!("Invalid success policy: {}", s)),
        }
    }
}

/// Sliding window limits for one delivery channel
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlidingWindowConfig {
    /// Counter key shared by every caller of the channel
    pub key: String,

    /// Window size in milliseconds
    pub window_ms: u64,

    /// Maximum admitted events per window
    pub threshold: u32,
}

impl Default for SlidingWindowConfig {
    fn default() -> Self {
        Self {
            key: "sms-limiter".to_string(),
            window_ms: 1000,
            threshold: 10,
        }
    }
}

impl SlidingWindowConfig {
    pub fn new(key: impl Into<String>, window: Duration, threshold: u32) -> Self {
        Self {
            key: key.into(),
            window_ms: window.as_millis() as u64,
            threshold,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Per-(business context, destination) verification code limits
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CodeThrottleConfig {
    /// Code lifetime in seconds
    pub code_ttl_seconds: u64,

    /// Minimum seconds between two sends to the same destination
    pub cooldown_seconds: u64,

    /// Verification attempts per issued code
    pub max_attempts: u32,

    /// Behaviour after a successful match
    pub success_policy: SuccessPolicy,

    /// Report an exhausted code as a plain mismatch instead of an error
    pub deny_on_exhausted: bool,
}

impl Default for CodeThrottleConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: 600,
            cooldown_seconds: 60,
            max_attempts: 3,
            success_policy: SuccessPolicy::SingleUse,
            deny_on_exhausted: true,
        }
    }
}

impl CodeThrottleConfig {
    pub fn code_ttl(&self) -> Duration {
        Duration::from_secs(self.code_ttl_seconds)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_seconds)
    }

    /// Remaining TTL above which a live code is still inside its cooldown
    pub fn resend_threshold(&self) -> Duration {
        self.code_ttl().saturating_sub(self.cooldown())
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// SMS channel limiter
    pub sms: SlidingWindowConfig,

    /// Verification code throttling
    pub code: CodeThrottleConfig,
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let sms = SlidingWindowConfig::default();
        let code = CodeThrottleConfig::default();
        Self {
            sms: SlidingWindowConfig {
                key: std::env::var("SMS_LIMITER_KEY").unwrap_or(sms.key),
                window_ms: env_or("SMS_LIMITER_WINDOW_MS", sms.window_ms),
                threshold: env_or("SMS_LIMITER_THRESHOLD", sms.threshold),
            },
            code: CodeThrottleConfig {
                code_ttl_seconds: env_or("CODE_TTL_SECONDS", code.code_ttl_seconds),
                cooldown_seconds: env_or("CODE_COOLDOWN_SECONDS", code.cooldown_seconds),
                max_attempts: env_or("CODE_MAX_ATTEMPTS", code.max_attempts),
                success_policy: env_or("CODE_SUCCESS_POLICY", code.success_policy),
                deny_on_exhausted: env_or("CODE_DENY_ON_EXHAUSTED", code.deny_on_exhausted),
            },
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.sms.threshold == 0 || self.sms.window_ms == 0 {
            return Err("rate_limit.sms window and threshold must be positive".to_string());
        }
        if self.code.max_attempts == 0 {
            return Err("rate_limit.code.max_attempts must be positive".to_string());
        }
        if self.code.cooldown_seconds >= self.code.code_ttl_seconds {
            return Err("rate_limit.code.cooldown_seconds must be shorter than the code TTL".to_string());
        }
        Ok(())
    }
}
