//! Token entities for the dual-token session lifecycle.

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// JWT issuer
pub const JWT_ISSUER: &str = "verigate";

/// Which operation a token is accepted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Accepted by request validation only
    Access,
    /// Accepted by the refresh operation only
    Refresh,
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub uid: i64,

    /// Session id, the unit of revocation
    pub sid: String,

    /// SHA-256 hex digest of the client's user agent
    pub fingerprint: String,

    pub kind: TokenKind,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for a token expiring `ttl` from now
    ///
    /// # Arguments
    ///
    /// * `uid` - The user's id
    /// * `sid` - The session the token belongs to
    /// * `fingerprint` - Digest produced by [`fingerprint_digest`]
    /// * `kind` - Access or refresh
    /// * `ttl` - Token lifetime
    /// * `issuer` - Value of the `iss` claim
    pub fn new(
        uid: i64,
        sid: impl Into<String>,
        fingerprint: impl Into<String>,
        kind: TokenKind,
        ttl: Duration,
        issuer: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            uid,
            sid: sid.into(),
            fingerprint: fingerprint.into(),
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: issuer.into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Seconds until expiry, negative once expired
    pub fn seconds_remaining(&self) -> i64 {
        self.exp - Utc::now().timestamp()
    }

    pub fn is_expired(&self) -> bool {
        self.seconds_remaining() < 0
    }

    /// Constant-time comparison against a presented fingerprint digest
    pub fn fingerprint_matches(&self, presented: &str) -> bool {
        constant_time_eq(self.fingerprint.as_bytes(), presented.as_bytes())
    }
}

/// Digest of a client's user agent, as embedded in token claims
///
/// # Arguments
///
/// * `user_agent` - Raw `User-Agent` header value (may be empty)
///
/// # Returns
///
/// Lowercase hex SHA-256 of the input
pub fn fingerprint_digest(user_agent: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_agent.as_bytes());
    hex::encode(hasher.finalize())
}

/// Token pair returned to clients after login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token
    pub access_token: String,

    /// Long-lived refresh token
    pub refresh_token: String,

    /// Session both tokens are bound to
    pub session_id: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

/// Result of a successful access-token validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAccess {
    pub claims: Claims,

    /// Fresh access token for the same session, present when the presented
    /// token was inside the renewal window
    pub renewed_token: Option<String>,
}
