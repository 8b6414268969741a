//! Main token service implementation

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Header, Validation};
use std::sync::Arc;

use crate::domain::entities::session::Session;
use crate::domain::entities::token::{
    fingerprint_digest, Claims, TokenKind, TokenPair, ValidatedAccess,
};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::SessionRegistry;
use crate::services::guard::AccessValidator;

use super::config::TokenServiceConfig;
use super::key_ring::{KeyProvider, SIGNING_ALGORITHM};

/// Service minting and validating access/refresh token pairs bound to
/// server-side sessions
pub struct TokenService<R: SessionRegistry> {
    pub(crate) registry: R,
    keys: Arc<dyn KeyProvider>,
    config: TokenServiceConfig,
    validation: Validation,
}

impl<R: SessionRegistry> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `registry` - Session registry consulted on every validation
    /// * `keys` - Signing and verification key lookup
    /// * `config` - Token service configuration
    pub fn new(registry: R, keys: Arc<dyn KeyProvider>, config: TokenServiceConfig) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        // Expiry is checked after the kind check so errors keep a fixed order
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            registry,
            keys,
            config,
            validation,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Opens a session and mints its first token pair
    ///
    /// # Arguments
    ///
    /// * `user_id` - The authenticated user
    /// * `fingerprint` - The client's user agent
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Access and refresh tokens sharing a new session id
    /// * `Err(DomainError)` - Registry unavailable or signing failed
    pub async fn issue_pair(&self, user_id: i64, fingerprint: &str) -> DomainResult<TokenPair> {
        let session = Session::new(user_id);
        self.registry.register(&session).await?;

        let refresh_ttl = to_chrono(self.config.refresh_ttl);
        let pair = self.mint_pair(user_id, &session.session_id, &fingerprint_digest(fingerprint), refresh_ttl)?;

        tracing::info!(
            user_id = user_id,
            session_id = %session.session_id,
            event = "session_opened",
            "Issued token pair for new session"
        );
        Ok(pair)
    }

    /// Validates an access token
    ///
    /// Checks run in a fixed order: structure and signature, expiry,
    /// fingerprint, then session state. Tokens inside the renewal window
    /// come back with a fresh access token for the same session.
    ///
    /// # Arguments
    ///
    /// * `token` - The access token
    /// * `fingerprint` - The presenting client's user agent
    pub async fn validate_access(&self, token: &str, fingerprint: &str) -> DomainResult<ValidatedAccess> {
        let claims = self.verify(token, TokenKind::Access, fingerprint).await?;

        let renewed_token = if claims.seconds_remaining() < self.config.renewal_window.as_secs() as i64 {
            let renewed = Claims::new(
                claims.uid,
                claims.sid.clone(),
                claims.fingerprint.clone(),
                TokenKind::Access,
                to_chrono(self.config.access_ttl),
                self.config.issuer.clone(),
            );
            tracing::debug!(
                user_id = claims.uid,
                session_id = %claims.sid,
                event = "access_token_renewed",
                "Access token near expiry, renewed"
            );
            Some(self.encode_claims(&renewed)?)
        } else {
            None
        };

        Ok(ValidatedAccess {
            claims,
            renewed_token,
        })
    }

    /// Mints a new pair from a refresh token
    ///
    /// The session id is kept, so revoking the session invalidates tokens
    /// minted before and after the refresh. The new refresh token expires
    /// with the presented one.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - A refresh token previously issued by this service
    /// * `fingerprint` - The presenting client's user agent
    pub async fn refresh(&self, refresh_token: &str, fingerprint: &str) -> DomainResult<TokenPair> {
        let claims = self.verify(refresh_token, TokenKind::Refresh, fingerprint).await?;

        let remaining = Duration::seconds(claims.seconds_remaining());
        let pair = self.mint_pair(claims.uid, &claims.sid, &claims.fingerprint, remaining)?;

        tracing::info!(
            user_id = claims.uid,
            session_id = %claims.sid,
            event = "token_refreshed",
            "Refreshed token pair"
        );
        Ok(pair)
    }

    /// Revokes a session; revoking twice is not an error
    pub async fn revoke(&self, session_id: &str) -> DomainResult<()> {
        self.registry.revoke(session_id).await?;
        tracing::info!(session_id = session_id, event = "session_revoked", "Session revoked");
        Ok(())
    }

    /// Whether a session is still active
    pub async fn check_session(&self, session_id: &str) -> DomainResult<bool> {
        self.registry.is_active(session_id).await
    }

    /// Decodes and checks a token of the expected kind, including the
    /// session lookup
    async fn verify(&self, token: &str, kind: TokenKind, fingerprint: &str) -> DomainResult<Claims> {
        let claims = self.decode_claims(token).map_err(|e| reject(e, "malformed"))?;

        if claims.kind != kind {
            return Err(reject(TokenError::Malformed, "wrong_kind"));
        }
        if Utc::now().timestamp() >= claims.exp {
            return Err(reject(TokenError::Expired, "expired"));
        }
        if !claims.fingerprint_matches(&fingerprint_digest(fingerprint)) {
            return Err(reject(TokenError::FingerprintMismatch, "fingerprint_mismatch"));
        }
        if !self.registry.is_active(&claims.sid).await? {
            return Err(reject(TokenError::SessionRevoked, "session_revoked"));
        }
        Ok(claims)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        if header.alg != SIGNING_ALGORITHM {
            return Err(TokenError::Malformed);
        }
        let key = header
            .kid
            .as_deref()
            .and_then(|kid| self.keys.verification_key(kid))
            .ok_or(TokenError::Malformed)?;

        decode::<Claims>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }

    fn mint_pair(
        &self,
        user_id: i64,
        session_id: &str,
        digest: &str,
        refresh_ttl: Duration,
    ) -> DomainResult<TokenPair> {
        let access_ttl = to_chrono(self.config.access_ttl);
        let access = Claims::new(
            user_id,
            session_id,
            digest,
            TokenKind::Access,
            access_ttl,
            self.config.issuer.clone(),
        );
        let refresh = Claims::new(
            user_id,
            session_id,
            digest,
            TokenKind::Refresh,
            refresh_ttl,
            self.config.issuer.clone(),
        );

        Ok(TokenPair {
            access_token: self.encode_claims(&access)?,
            refresh_token: self.encode_claims(&refresh)?,
            session_id: session_id.to_string(),
            access_expires_in: access_ttl.num_seconds(),
            refresh_expires_in: refresh_ttl.num_seconds(),
        })
    }

    /// Encodes claims into a JWT signed with the current key
    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, DomainError> {
        let mut header = Header::new(SIGNING_ALGORITHM);
        header.kid = Some(self.keys.current_key_id().to_string());
        encode(&header, claims, self.keys.signing_key())
            .map_err(|_| DomainError::Token(TokenError::SigningFailed))
    }
}

#[async_trait]
impl<R: SessionRegistry> AccessValidator for TokenService<R> {
    async fn validate_access(&self, token: &str, fingerprint: &str) -> DomainResult<ValidatedAccess> {
        TokenService::validate_access(self, token, fingerprint).await
    }
}

fn reject(error: TokenError, reason: &'static str) -> DomainError {
    tracing::warn!(reason = reason, event = "token_rejected", "Token rejected");
    error.into()
}

fn to_chrono(duration: std::time::Duration) -> Duration {
    Duration::seconds(duration.as_secs() as i64)
}
