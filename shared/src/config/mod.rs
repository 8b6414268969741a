//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing keys and token lifetimes
//! - `cache` - Redis connection and timeout configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - SMS sliding window and verification-code throttling
//! - `sms` - Delivery provider configuration

pub mod auth;
pub mod cache;
pub mod environment;
pub mod rate_limit;
pub mod sms;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use auth::{JwtConfig, SigningKeyConfig};
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::{CodeThrottleConfig, RateLimitConfig, SlidingWindowConfig, SuccessPolicy};
pub use sms::SmsConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Token signing and lifetime configuration
    pub jwt: JwtConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Throttling configuration
    pub rate_limit: RateLimitConfig,

    /// Delivery provider configuration
    pub sms: SmsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            jwt: JwtConfig::from_env(),
            cache: CacheConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            sms: SmsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        self.jwt.validate()?;
        self.rate_limit.validate()?;
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is missing or malformed
pub(crate) fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
