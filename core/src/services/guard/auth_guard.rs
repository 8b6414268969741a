//! Auth guard implementation

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::token::ValidatedAccess;
use crate::errors::{DomainError, DomainResult};

/// Access-token validation capability the guard delegates to
#[async_trait]
pub trait AccessValidator: Send + Sync {
    async fn validate_access(&self, token: &str, fingerprint: &str) -> DomainResult<ValidatedAccess>;
}

/// Outcome of guarding one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The path does not require authentication
    Skipped,
    /// A valid access token was presented
    Authorized(ValidatedAccess),
}

/// Per-request access-token check with an ignore-path list
#[derive(Clone)]
pub struct AuthGuard {
    validator: Arc<dyn AccessValidator>,
    ignore_paths: HashSet<String>,
}

impl AuthGuard {
    pub fn new(validator: Arc<dyn AccessValidator>) -> Self {
        Self {
            validator,
            ignore_paths: HashSet::new(),
        }
    }

    /// Adds a path that passes without a token
    pub fn ignore_path(mut self, path: impl Into<String>) -> Self {
        self.ignore_paths.insert(path.into());
        self
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore_paths.contains(path)
    }

    /// Authorizes one request
    ///
    /// # Arguments
    ///
    /// * `path` - Request path
    /// * `authorization` - Raw `Authorization` header, if present
    /// * `user_agent` - Raw `User-Agent` header; a missing header is an empty fingerprint
    ///
    /// # Returns
    ///
    /// * `Ok(GuardDecision)` - Request may proceed
    /// * `Err(DomainError)` - `Unauthorized` for a missing or badly formed
    ///   header, a token error otherwise
    pub async fn authorize(
        &self,
        path: &str,
        authorization: Option<&str>,
        user_agent: Option<&str>,
    ) -> DomainResult<GuardDecision> {
        if self.is_ignored(path) {
            return Ok(GuardDecision::Skipped);
        }

        let token = extract_bearer_token(authorization).map_err(|e| {
            tracing::debug!(path = path, event = "missing_bearer_token", "Request without bearer token");
            e
        })?;

        let validated = self
            .validator
            .validate_access(token, user_agent.unwrap_or_default())
            .await?;
        Ok(GuardDecision::Authorized(validated))
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value
///
/// Anything other than exactly the `Bearer` scheme followed by one
/// non-empty token is `Unauthorized`.
pub fn extract_bearer_token(header: Option<&str>) -> DomainResult<&str> {
    let header = header.ok_or(DomainError::Unauthorized)?;
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(DomainError::Unauthorized),
    }
}
