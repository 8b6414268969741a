use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

use vg_core::domain::entities::verification_code::{generate_code, CheckOutcome, CodeIdentity, ThrottledCode};
use vg_core::errors::{CodeError, DomainResult};
use vg_core::services::CodeStore;
use vg_shared::config::CodeThrottleConfig;
use vg_shared::utils::email::mask_destination;

struct StoredCode {
    record: ThrottledCode,
    expires_at: Instant,
}

/// Verification code store held in process memory
pub struct MemoryCodeStore {
    codes: Mutex<HashMap<String, StoredCode>>,
    config: CodeThrottleConfig,
}

impl MemoryCodeStore {
    pub fn new(config: CodeThrottleConfig) -> Self {
        Self {
            codes: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Store a specific code with the same cooldown rules as `issue_code`
    pub async fn set_code(&self, identity: CodeIdentity, code: String) -> DomainResult<()> {
        let now = Instant::now();
        let key = identity.code_key();
        let mut codes = self.codes.lock().await;

        codes.retain(|_, stored| stored.expires_at > now);
        if let Some(stored) = codes.get(&key) {
            if ThrottledCode::blocks_resend(stored.expires_at - now, &self.config) {
                return Err(CodeError::SendTooFrequent.into());
            }
        }

        codes.insert(
            key,
            StoredCode {
                record: ThrottledCode::new(identity, code, self.config.max_attempts),
                expires_at: now + self.config.code_ttl(),
            },
        );
        Ok(())
    }

    /// Number of live records
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.codes.lock().await.values().filter(|stored| stored.expires_at > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn issue_code(&self, biz: &str, destination: &str) -> DomainResult<String> {
        let code = generate_code();
        self.set_code(CodeIdentity::new(biz, destination), code.clone()).await?;

        info!(
            event = "code_issued",
            biz = %biz,
            destination = %mask_destination(destination),
            "Verification code stored"
        );
        Ok(code)
    }

    async fn check_code(&self, biz: &str, destination: &str, candidate: &str) -> DomainResult<bool> {
        let key = CodeIdentity::new(biz, destination).code_key();
        let now = Instant::now();
        let mut codes = self.codes.lock().await;

        let outcome = match codes.get_mut(&key) {
            Some(stored) if stored.expires_at > now => stored.record.check(candidate, self.config.success_policy),
            _ => CheckOutcome::Mismatched,
        };

        debug!(
            event = "code_checked",
            biz = %biz,
            destination = %mask_destination(destination),
            outcome = ?outcome,
            "Verification code checked"
        );

        match outcome {
            CheckOutcome::Matched => Ok(true),
            CheckOutcome::Mismatched => Ok(false),
            CheckOutcome::Exhausted => Err(CodeError::VerifyTooFrequent.into()),
        }
    }
}
