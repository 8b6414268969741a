//! Main authentication service implementation

use std::sync::Arc;

use vg_shared::utils::phone::{is_valid_e164, mask_phone_number, normalize_phone_number};

use crate::domain::entities::token::TokenPair;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{SessionRegistry, UserRepository};
use crate::services::code::{CodeService, CodeStore, DeliverMessage, RateLimiter, SendCodeResult};
use crate::services::token::TokenService;
use crate::services::user::{PasswordHasher, UserCache, UserService};

use super::config::AuthServiceConfig;

/// Authentication service for the complete login flow
pub struct AuthService<L, S, D, U, C, H, R>
where
    L: RateLimiter,
    S: CodeStore,
    D: DeliverMessage,
    U: UserRepository,
    C: UserCache + 'static,
    H: PasswordHasher,
    R: SessionRegistry,
{
    /// Code sending and verification
    code_service: Arc<CodeService<L, S, D>>,
    /// Account lookup and creation
    user_service: Arc<UserService<U, C, H>>,
    /// Token pair management
    token_service: Arc<TokenService<R>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<L, S, D, U, C, H, R> AuthService<L, S, D, U, C, H, R>
where
    L: RateLimiter,
    S: CodeStore,
    D: DeliverMessage,
    U: UserRepository,
    C: UserCache + 'static,
    H: PasswordHasher,
    R: SessionRegistry,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `code_service` - Service for one-time codes
    /// * `user_service` - Service for accounts
    /// * `token_service` - Service for token pairs
    /// * `config` - Service configuration
    pub fn new(
        code_service: Arc<CodeService<L, S, D>>,
        user_service: Arc<UserService<U, C, H>>,
        token_service: Arc<TokenService<R>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            code_service,
            user_service,
            token_service,
            config,
        }
    }

    /// Send a login code to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number (E.164 after normalization)
    pub async fn send_login_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        let phone = validated_phone(phone)?;
        self.code_service.send(&self.config.login_biz, &phone).await
    }

    /// Log in with a phone number and the code sent to it
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number the code was sent to
    /// * `code` - The submitted code
    /// * `fingerprint` - The client's user agent
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Tokens for a new session
    /// * `Err(DomainError)` - `AuthError::InvalidVerificationCode` for any
    ///   rejected code, store errors otherwise
    pub async fn login_with_code(&self, phone: &str, code: &str, fingerprint: &str) -> DomainResult<TokenPair> {
        let phone = validated_phone(phone)?;

        if !self.code_service.verify(&self.config.login_biz, &phone, code).await? {
            tracing::warn!(
                phone = %mask_phone_number(&phone),
                event = "code_login_failed",
                "Code login rejected"
            );
            return Err(AuthError::InvalidVerificationCode.into());
        }

        let user = if self.config.allow_registration {
            self.user_service.find_or_create_by_phone(&phone).await?
        } else {
            self.user_service
                .find_by_phone(&phone)
                .await?
                .ok_or(AuthError::UserNotFound)?
        };

        let pair = self.token_service.issue_pair(user.id, fingerprint).await?;
        tracing::info!(user_id = user.id, event = "code_login", "Code login succeeded");
        Ok(pair)
    }

    /// Log in with e-mail and password
    pub async fn login_with_password(&self, email: &str, password: &str, fingerprint: &str) -> DomainResult<TokenPair> {
        let user = self.user_service.login(email, password).await?;
        self.token_service.issue_pair(user.id, fingerprint).await
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh(&self, refresh_token: &str, fingerprint: &str) -> DomainResult<TokenPair> {
        self.token_service.refresh(refresh_token, fingerprint).await
    }

    /// End a session; tokens bound to it stop validating
    pub async fn logout(&self, session_id: &str) -> DomainResult<()> {
        self.token_service.revoke(session_id).await
    }
}

fn validated_phone(phone: &str) -> DomainResult<String> {
    let phone = normalize_phone_number(phone);
    if !is_valid_e164(&phone) {
        return Err(DomainError::Validation {
            message: "Phone number must be in E.164 format".to_string(),
        });
    }
    Ok(phone)
}
