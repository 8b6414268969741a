//! Main user service implementation

use std::sync::Arc;
use std::time::Duration;

use vg_shared::utils::email::{is_valid_email, mask_email};
use vg_shared::utils::password::{is_strong_password, MIN_PASSWORD_LENGTH, PASSWORD_SYMBOLS};
use vg_shared::utils::phone::{is_valid_e164, mask_phone_number};

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;

use super::cache_filler::CacheFiller;
use super::traits::{PasswordHasher, UserCache};

/// Default bound of the cache fill queue
const DEFAULT_FILL_QUEUE: usize = 256;

/// User service for account lookup, signup and login
pub struct UserService<U: UserRepository, C: UserCache, H: PasswordHasher> {
    /// Identity/profile store
    repository: Arc<U>,
    /// Profile cache
    cache: Arc<C>,
    /// Password hash collaborator
    hasher: Arc<H>,
    /// Background cache population
    filler: CacheFiller,
}

impl<U, C, H> UserService<U, C, H>
where
    U: UserRepository,
    C: UserCache + 'static,
    H: PasswordHasher,
{
    /// Create a new user service and start its cache filler
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `repository` - Identity store
    /// * `cache` - Profile cache
    /// * `hasher` - Password hasher
    pub fn new(repository: Arc<U>, cache: Arc<C>, hasher: Arc<H>) -> Self {
        Self::with_fill_queue(repository, cache, hasher, DEFAULT_FILL_QUEUE)
    }

    pub fn with_fill_queue(repository: Arc<U>, cache: Arc<C>, hasher: Arc<H>, capacity: usize) -> Self {
        let filler = CacheFiller::start(cache.clone(), capacity);
        Self {
            repository,
            cache,
            hasher,
            filler,
        }
    }

    /// Register an e-mail account
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created account, without its password hash
    /// * `Err(DomainError)` - Invalid input or `AuthError::DuplicateEmail`
    pub async fn signup(&self, email: &str, password: &str) -> DomainResult<User> {
        if !is_valid_email(email) {
            return Err(DomainError::Validation {
                message: "Invalid e-mail address".to_string(),
            });
        }
        if !is_strong_password(password) {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters and contain a letter, a digit and one of {}",
                    MIN_PASSWORD_LENGTH, PASSWORD_SYMBOLS
                ),
            });
        }
        if self.repository.find_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail.into());
        }

        let hash = self.hasher.hash(password).await?;
        let user = self.repository.create(User::with_email(email, hash)).await?;

        tracing::info!(user_id = user.id, email = %mask_email(email), event = "user_signed_up", "User signed up");
        Ok(user.without_secrets())
    }

    /// Authenticate with e-mail and password
    ///
    /// Unknown accounts, accounts without a password and wrong passwords
    /// all produce `AuthError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<User> {
        let user = self.repository.find_by_email(email).await?;

        let verified = match user.as_ref().and_then(|u| u.password_hash.as_deref()) {
            Some(hash) => self.hasher.verify(password, hash).await?,
            None => false,
        };

        match user {
            Some(user) if verified => {
                tracing::info!(user_id = user.id, event = "password_login", "Password login succeeded");
                Ok(user.without_secrets())
            }
            _ => {
                tracing::warn!(email = %mask_email(email), event = "password_login_failed", "Password login failed");
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }

    /// Account for a phone number, created on first use
    pub async fn find_or_create_by_phone(&self, phone: &str) -> DomainResult<User> {
        if !is_valid_e164(phone) {
            return Err(DomainError::Validation {
                message: "Phone number must be in E.164 format".to_string(),
            });
        }

        if let Some(user) = self.repository.find_by_phone(phone).await? {
            return Ok(user.without_secrets());
        }

        match self.repository.create(User::with_phone(phone)).await {
            Ok(user) => {
                tracing::info!(
                    user_id = user.id,
                    phone = %mask_phone_number(phone),
                    event = "user_created_by_phone",
                    "Created account for phone"
                );
                Ok(user.without_secrets())
            }
            // Lost a race with a concurrent create for the same phone
            Err(e) => match self.repository.find_by_phone(phone).await? {
                Some(user) => Ok(user.without_secrets()),
                None => Err(e),
            },
        }
    }

    /// Account for a phone number, if one exists
    pub async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>> {
        Ok(self
            .repository
            .find_by_phone(phone)
            .await?
            .map(|user| user.without_secrets()))
    }

    /// Profile read, cache first
    ///
    /// A miss loads from the repository and queues a background cache fill.
    /// Cache errors degrade to a repository read.
    pub async fn profile(&self, id: i64) -> DomainResult<User> {
        match self.cache.get(id).await {
            Ok(Some(user)) => return Ok(user),
            Ok(None) => {}
            Err(e) => tracing::warn!(user_id = id, error = %e, event = "user_cache_read_failed", "User cache read failed"),
        }

        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?
            .without_secrets();

        self.filler.enqueue(user.clone()).await;
        Ok(user)
    }

    /// Stop the cache filler, waiting up to `grace` for queued fills
    pub async fn shutdown(&self, grace: Duration) {
        self.filler.shutdown(grace).await;
    }
}
