//! Configuration for the code service

use std::time::Duration;

use vg_shared::config::{RateLimitConfig, SmsConfig};

/// Configuration for the code service
#[derive(Debug, Clone)]
pub struct CodeServiceConfig {
    /// Limiter key shared by every send on this delivery channel
    pub limiter_key: String,
    /// Template used for code messages
    pub template_id: String,
    /// Lifetime of an issued code
    pub code_ttl: Duration,
    /// Minimum interval between two sends to one destination
    pub cooldown: Duration,
    /// Report exhausted attempts as a plain mismatch
    pub deny_on_exhausted: bool,
}

impl CodeServiceConfig {
    pub fn from_config(rate_limit: &RateLimitConfig, sms: &SmsConfig) -> Self {
        Self {
            limiter_key: rate_limit.sms.key.clone(),
            template_id: sms.code_template_id.clone(),
            code_ttl: rate_limit.code.code_ttl(),
            cooldown: rate_limit.code.cooldown(),
            deny_on_exhausted: rate_limit.code.deny_on_exhausted,
        }
    }
}

impl Default for CodeServiceConfig {
    fn default() -> Self {
        Self::from_config(&RateLimitConfig::default(), &SmsConfig::default())
    }
}
