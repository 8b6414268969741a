//! Main code service implementation

use std::sync::Arc;

use vg_shared::utils::email::mask_destination;

use crate::errors::{CodeError, DomainError, DomainResult, StoreError};

use super::config::CodeServiceConfig;
use super::traits::{CodeStore, DeliverMessage, RateLimiter};
use super::types::SendCodeResult;

/// Code service composing admission, issue and delivery of one-time codes
pub struct CodeService<L: RateLimiter, S: CodeStore, D: DeliverMessage> {
    /// Channel-wide sliding-window limiter
    limiter: Arc<L>,
    /// Store holding codes and attempt counters
    store: Arc<S>,
    /// Gateway used to deliver codes
    delivery: Arc<D>,
    /// Service configuration
    config: CodeServiceConfig,
}

impl<L: RateLimiter, S: CodeStore, D: DeliverMessage> CodeService<L, S, D> {
    /// Create a new code service
    ///
    /// # Arguments
    ///
    /// * `limiter` - Sliding-window limiter for the delivery channel
    /// * `store` - Code store implementation
    /// * `delivery` - Message gateway
    /// * `config` - Service configuration
    pub fn new(limiter: Arc<L>, store: Arc<S>, delivery: Arc<D>, config: CodeServiceConfig) -> Self {
        Self {
            limiter,
            store,
            delivery,
            config,
        }
    }

    pub fn config(&self) -> &CodeServiceConfig {
        &self.config
    }

    /// Issue and deliver a code
    ///
    /// This method:
    /// 1. Asks the channel limiter for admission (denied on limiter failure)
    /// 2. Issues a code, refusing while the previous one is in cooldown
    /// 3. Delivers the code; a failed delivery leaves the code issued
    ///
    /// # Arguments
    ///
    /// * `biz` - Business context, e.g. `login`
    /// * `destination` - Phone number or e-mail address
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Code issued and delivered
    /// * `Err(DomainError)` - `RateLimited`, `SendTooFrequent`, `DeliveryFailed`,
    ///   `LimiterUnavailable` or `StoreUnavailable`
    pub async fn send(&self, biz: &str, destination: &str) -> DomainResult<SendCodeResult> {
        validate_identity(biz, destination)?;
        let masked = mask_destination(destination);

        let admitted = self.limiter.admit(&self.config.limiter_key).await.map_err(|e| {
            tracing::error!(
                destination = %masked,
                limiter_key = %self.config.limiter_key,
                error = %e,
                event = "limiter_unavailable",
                "Rate limiter failed, denying send"
            );
            match e {
                DomainError::Store(StoreError::LimiterUnavailable { .. }) => e,
                other => StoreError::LimiterUnavailable {
                    message: other.to_string(),
                }
                .into(),
            }
        })?;

        if !admitted {
            tracing::warn!(
                destination = %masked,
                limiter_key = %self.config.limiter_key,
                event = "rate_limit_exceeded",
                "Send rejected by channel rate limiter"
            );
            return Err(CodeError::RateLimited.into());
        }

        let code = match self.store.issue_code(biz, destination).await {
            Ok(code) => code,
            Err(DomainError::Code(CodeError::SendTooFrequent)) => {
                tracing::warn!(
                    biz = biz,
                    destination = %masked,
                    event = "send_too_frequent",
                    "Code requested again inside the cooldown"
                );
                return Err(CodeError::SendTooFrequent.into());
            }
            Err(e) => {
                tracing::error!(
                    biz = biz,
                    destination = %masked,
                    error = %e,
                    event = "code_issue_failed",
                    "Failed to issue verification code"
                );
                return Err(e);
            }
        };

        tracing::info!(biz = biz, destination = %masked, event = "code_issued", "Issued verification code");

        if let Err(e) = self
            .delivery
            .deliver(&self.config.template_id, &[code], destination)
            .await
        {
            tracing::error!(
                biz = biz,
                destination = %masked,
                error = %e,
                event = "code_delivery_failed",
                "Failed to deliver verification code"
            );
            return Err(match e {
                DomainError::Code(CodeError::DeliveryFailed { .. }) => e,
                other => CodeError::DeliveryFailed {
                    message: other.to_string(),
                }
                .into(),
            });
        }

        Ok(SendCodeResult {
            expires_in: self.config.code_ttl,
            resend_after: self.config.cooldown,
        })
    }

    /// Check a submitted code
    ///
    /// # Arguments
    ///
    /// * `biz` - Business context the code was issued for
    /// * `destination` - Phone number or e-mail address
    /// * `candidate` - The code submitted by the user
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Code matched
    /// * `Ok(false)` - Wrong, expired or unknown code; also exhausted attempts
    ///   when `deny_on_exhausted` is set
    /// * `Err(DomainError)` - `VerifyTooFrequent` (when not denied) or `StoreUnavailable`
    pub async fn verify(&self, biz: &str, destination: &str, candidate: &str) -> DomainResult<bool> {
        validate_identity(biz, destination)?;

        match self.store.check_code(biz, destination, candidate).await {
            Ok(matched) => {
                tracing::info!(
                    biz = biz,
                    destination = %mask_destination(destination),
                    matched = matched,
                    event = "code_checked",
                    "Verification code checked"
                );
                Ok(matched)
            }
            Err(DomainError::Code(CodeError::VerifyTooFrequent)) => {
                tracing::warn!(
                    biz = biz,
                    destination = %mask_destination(destination),
                    event = "verify_too_frequent",
                    "Verification attempts exhausted"
                );
                if self.config.deny_on_exhausted {
                    Ok(false)
                } else {
                    Err(CodeError::VerifyTooFrequent.into())
                }
            }
            Err(e) => {
                tracing::error!(
                    biz = biz,
                    destination = %mask_destination(destination),
                    error = %e,
                    event = "code_check_failed",
                    "Failed to check verification code"
                );
                Err(e)
            }
        }
    }
}

fn validate_identity(biz: &str, destination: &str) -> DomainResult<()> {
    if biz.is_empty() || destination.is_empty() {
        return Err(DomainError::Validation {
            message: "Business context and destination are required".to_string(),
        });
    }
    Ok(())
}
