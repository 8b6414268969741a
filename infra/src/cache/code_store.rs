//! Redis-backed verification code store
//!
//! Issue and verify each run as one Lua script, so the cooldown check and
//! the attempt decrement never race with a concurrent caller. Codes are
//! stored as SHA-256 digests, never in clear.

use async_trait::async_trait;
use redis::Script;
use sha2::{Digest, Sha256};
use tracing::{debug, error, info};

use vg_core::domain::entities::verification_code::{generate_code, CodeIdentity};
use vg_core::errors::{CodeError, DomainError, DomainResult, StoreError};
use vg_core::services::CodeStore;
use vg_shared::config::{CodeThrottleConfig, SuccessPolicy};
use vg_shared::utils::email::mask_destination;

use super::redis_client::RedisClient;

const SET_CODE_SCRIPT: &str = include_str!("lua/set_code.lua");
const VERIFY_CODE_SCRIPT: &str = include_str!("lua/verify_code.lua");

/// Verification code store backed by Redis
pub struct RedisCodeStore {
    redis_client: RedisClient,
    config: CodeThrottleConfig,
    set_script: Script,
    verify_script: Script,
}

impl RedisCodeStore {
    pub fn new(redis_client: RedisClient, config: CodeThrottleConfig) -> Self {
        Self {
            redis_client,
            config,
            set_script: Script::new(SET_CODE_SCRIPT),
            verify_script: Script::new(VERIFY_CODE_SCRIPT),
        }
    }

    fn keys(&self, identity: &CodeIdentity) -> Vec<String> {
        vec![
            self.redis_client.key(&identity.code_key()),
            self.redis_client.key(&identity.counter_key()),
        ]
    }

    /// Store a specific code, used by `issue_code` after generation
    ///
    /// # Returns
    /// * `Ok(())` - Code stored with fresh TTL and attempt counter
    /// * `Err(CodeError::SendTooFrequent)` - Previous code still in cooldown
    /// * `Err(StoreError::Inconsistent)` - Code key found without expiry
    pub async fn set_code(&self, identity: &CodeIdentity, code: &str) -> DomainResult<()> {
        let args = vec![
            hash_code(code),
            (self.config.code_ttl().as_millis() as u64).to_string(),
            (self.config.resend_threshold().as_millis() as u64).to_string(),
            self.config.max_attempts.to_string(),
        ];

        let status: i64 = self
            .redis_client
            .eval_script(&self.set_script, &self.keys(identity), &args)
            .await
            .map_err(|e| store_failure("set_code", e.into()))?;

        match status {
            0 => Ok(()),
            -1 => Err(CodeError::SendTooFrequent.into()),
            -2 => {
                error!(
                    event = "code_store_inconsistent",
                    biz = %identity.biz,
                    destination = %mask_destination(&identity.destination),
                    "Code key exists without expiry"
                );
                Err(StoreError::Inconsistent { key: identity.code_key() }.into())
            }
            other => Err(DomainError::Internal {
                message: format!("Unexpected set_code status {}", other),
            }),
        }
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn issue_code(&self, biz: &str, destination: &str) -> DomainResult<String> {
        let identity = CodeIdentity::new(biz, destination);
        let code = generate_code();
        self.set_code(&identity, &code).await?;

        info!(
            event = "code_issued",
            biz = %biz,
            destination = %mask_destination(destination),
            "Verification code stored"
        );
        Ok(code)
    }

    async fn check_code(&self, biz: &str, destination: &str, candidate: &str) -> DomainResult<bool> {
        let identity = CodeIdentity::new(biz, destination);
        let consume = match self.config.success_policy {
            SuccessPolicy::SingleUse => "1",
            SuccessPolicy::ReplayWithinTtl => "0",
        };
        let args = vec![hash_code(candidate), consume.to_string()];

        let status: i64 = self
            .redis_client
            .eval_script(&self.verify_script, &self.keys(&identity), &args)
            .await
            .map_err(|e| store_failure("verify_code", e.into()))?;

        debug!(
            event = "code_checked",
            biz = %biz,
            destination = %mask_destination(destination),
            status,
            "Verification code checked"
        );

        match status {
            0 => Ok(true),
            -2 => Ok(false),
            -1 => Err(CodeError::VerifyTooFrequent.into()),
            other => Err(DomainError::Internal {
                message: format!("Unexpected verify_code status {}", other),
            }),
        }
    }
}

fn store_failure(operation: &str, error: DomainError) -> DomainError {
    error!(event = "code_store_unavailable", operation, error = %error, "Code store call failed");
    error
}

/// SHA-256 hex digest of a code
pub(crate) fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}
