//! Configuration for the token service

use std::time::Duration;

use vg_shared::config::JwtConfig;

use crate::domain::entities::token::JWT_ISSUER;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime, also the absolute session lifetime
    pub refresh_ttl: Duration,
    /// Access tokens closer than this to expiry are renewed on validation
    pub renewal_window: Duration,
    /// Value of the `iss` claim
    pub issuer: String,
}

impl TokenServiceConfig {
    pub fn from_jwt_config(config: &JwtConfig) -> Self {
        Self {
            access_ttl: config.access_ttl(),
            refresh_ttl: config.refresh_ttl(),
            renewal_window: config.renewal_window(),
            issuer: config.issuer.clone(),
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_ttl: Duration::from_secs(3600),
            refresh_ttl: Duration::from_secs(7 * 24 * 60 * 60),
            renewal_window: Duration::from_secs(600),
            issuer: JWT_ISSUER.to_string(),
        }
    }
}
