//! Token signing configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::env_or;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// A verification-only key kept around while tokens signed with it are live
#[derive(Clone, Deserialize, Serialize)]
pub struct SigningKeyConfig {
    /// Key identifier carried in the token header
    pub key_id: String,
    /// HMAC secret
    pub secret: String,
}

impl std::fmt::Debug for SigningKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyConfig")
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// JWT configuration
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Secret of the current signing key
    pub secret: String,

    /// Identifier of the current signing key
    pub key_id: String,

    /// Retired keys still accepted for verification
    pub previous_keys: Vec<SigningKeyConfig>,

    /// Access token lifetime in seconds
    pub access_token_expiry: u64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: u64,

    /// Remaining lifetime (seconds) under which a fresh access token is handed out
    pub renewal_window: u64,

    /// How long (seconds) a positive session lookup may be served from memory
    pub session_cache_ttl: u64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            key_id: "k1".to_string(),
            previous_keys: Vec::new(),
            access_token_expiry: 3600,     // 1 hour
            refresh_token_expiry: 604_800, // 7 days
            renewal_window: 600,           // 10 minutes
            session_cache_ttl: 5,
            issuer: "verigate".to_string(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("key_id", &self.key_id)
            .field("previous_keys", &self.previous_keys)
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("renewal_window", &self.renewal_window)
            .field("session_cache_ttl", &self.session_cache_ttl)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// `JWT_PREVIOUS_KEYS` is a comma separated list of `key_id:secret` pairs.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let previous_keys = std::env::var("JWT_PREVIOUS_KEYS")
            .map(|raw| parse_key_list(&raw))
            .unwrap_or_default();

        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            key_id: std::env::var("JWT_KEY_ID").unwrap_or(defaults.key_id),
            previous_keys,
            access_token_expiry: env_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: env_or("JWT_REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry),
            renewal_window: env_or("JWT_RENEWAL_WINDOW", defaults.renewal_window),
            session_cache_ttl: env_or("JWT_SESSION_CACHE_TTL", defaults.session_cache_ttl),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: u64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: u64) -> Self {
        self.refresh_token_expiry = days * 86_400;
        self
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_expiry)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_expiry)
    }

    pub fn renewal_window(&self) -> Duration {
        Duration::from_secs(self.renewal_window)
    }

    /// Revocation cache lifetime, never longer than an access token lives
    pub fn session_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.session_cache_ttl.min(self.access_token_expiry))
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.secret.is_empty() {
            return Err("jwt.secret must not be empty".to_string());
        }
        if self.access_token_expiry == 0 {
            return Err("jwt.access_token_expiry must be positive".to_string());
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err("jwt.refresh_token_expiry must exceed the access token expiry".to_string());
        }
        if self.previous_keys.iter().any(|k| k.key_id == self.key_id) {
            return Err(format!("jwt key id '{}' is configured twice", self.key_id));
        }
        Ok(())
    }
}

fn parse_key_list(raw: &str) -> Vec<SigningKeyConfig> {
    raw.split(',')
        .filter_map(|pair| pair.trim().split_once(':'))
        .filter(|(key_id, secret)| !key_id.is_empty() && !secret.is_empty())
        .map(|(key_id, secret)| SigningKeyConfig {
            key_id: key_id.to_string(),
            secret: secret.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_list() {
        let keys = parse_key_list("k0:old-secret, k-1:older,broken,:empty");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].key_id, "k0");
        assert_eq!(keys[0].secret, "old-secret");
        assert_eq!(keys[1].key_id, "k-1");
    }

    #[test]
    fn test_session_cache_ttl_is_clamped() {
        let mut config = JwtConfig::default();
        config.access_token_expiry = 3;
        config.session_cache_ttl = 30;
        assert_eq!(config.session_cache_ttl(), Duration::from_secs(3));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = JwtConfig::new("super-secret-value");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_validate() {
        assert!(JwtConfig::default().validate().is_ok());

        let mut config = JwtConfig::default();
        config.refresh_token_expiry = config.access_token_expiry;
        assert!(config.validate().is_err());

        let mut config = JwtConfig::default();
        config.previous_keys.push(SigningKeyConfig {
            key_id: config.key_id.clone(),
            secret: "x".to_string(),
        });
        assert!(config.validate().is_err());
    }
}
