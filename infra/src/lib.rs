//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for Verigate. It provides
//! concrete implementations of the capability traits declared in `vg_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client plus the Lua-scripted code store, sliding-window
//!   limiter, session registry and user cache
//! - **Memory**: single-node implementations with the same atomic semantics
//! - **SMS**: delivery adapters (log sink, Twilio REST API)
//! - **Services**: bcrypt password hashing
//! - **Telemetry**: tracing subscriber setup

use std::sync::Arc;

use vg_core::errors::{DomainError, StoreError};
use vg_core::repositories::{CachedSessionRegistry, UserRepository};
use vg_core::services::{
    AuthGuard, AuthService, AuthServiceConfig, CodeService, CodeServiceConfig, KeyRing, TokenService,
    TokenServiceConfig, UserService,
};
use vg_shared::config::AppConfig;

/// Cache module - Redis client and Redis-backed stores
pub mod cache;

/// In-process stores for development and tests
pub mod memory;

/// Services module - Infrastructure service implementations
pub mod services;

/// SMS service module - External SMS providers
pub mod sms;

/// Tracing subscriber setup
pub mod telemetry;

use cache::{RedisClient, RedisCodeStore, RedisSessionRegistry, RedisUserCache};
use services::auth::{BcryptHasher, RedisSlidingWindowLimiter};
use sms::SmsDelivery;

/// Queue depth of the background profile cache filler
const CACHE_FILL_CAPACITY: usize = 256;

/// Session registry used by the Redis deployment
pub type SessionStore = CachedSessionRegistry<RedisSessionRegistry>;

/// Code service wired to Redis and the configured SMS provider
pub type AppCodeService = CodeService<RedisSlidingWindowLimiter, RedisCodeStore, SmsDelivery>;

/// Token service wired to the cached Redis session registry
pub type AppTokenService = TokenService<SessionStore>;

/// User service wired to the caller's identity store
pub type AppUserService<U> = UserService<U, RedisUserCache, BcryptHasher>;

/// Login orchestration over the services above
pub type AppAuthService<U> = AuthService<
    RedisSlidingWindowLimiter,
    RedisCodeStore,
    SmsDelivery,
    U,
    RedisUserCache,
    BcryptHasher,
    SessionStore,
>;

/// Infrastructure service container
pub struct InfrastructureServices<U: UserRepository> {
    pub config: AppConfig,
    pub redis: RedisClient,
    pub code_service: Arc<AppCodeService>,
    pub token_service: Arc<AppTokenService>,
    pub user_service: Arc<AppUserService<U>>,
    pub auth_service: Arc<AppAuthService<U>>,
    pub guard: Arc<AuthGuard>,
}

impl<U: UserRepository> InfrastructureServices<U> {
    /// Stop background work owned by the services
    pub async fn shutdown(&self, grace: std::time::Duration) {
        self.user_service.shutdown(grace).await;
    }
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - Configuration (`.env`, optional config file, environment)
/// - The Redis connection and every Redis-backed store
/// - The SMS delivery adapter
/// - Code, token, user and login services plus the request guard
///
/// The identity store is supplied by the caller.
pub async fn initialize<U: UserRepository + 'static>(
    users: Arc<U>,
) -> Result<InfrastructureServices<U>, InfrastructureError> {
    let config = load_config()?;
    initialize_with_config(config, users).await
}

/// Initialize infrastructure services from an already loaded configuration
pub async fn initialize_with_config<U: UserRepository + 'static>(
    config: AppConfig,
    users: Arc<U>,
) -> Result<InfrastructureServices<U>, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services...");

    let redis = RedisClient::new(config.cache.clone()).await?;

    let limiter = Arc::new(RedisSlidingWindowLimiter::new(redis.clone(), &config.rate_limit.sms));
    let code_store = Arc::new(RedisCodeStore::new(redis.clone(), config.rate_limit.code.clone()));
    let delivery = Arc::new(sms::create_sms_service(&config.sms)?);
    let code_service = Arc::new(CodeService::new(
        limiter,
        code_store,
        delivery,
        CodeServiceConfig::from_config(&config.rate_limit, &config.sms),
    ));

    let keys = KeyRing::from_config(&config.jwt)
        .map_err(|e| InfrastructureError::Config(format!("Invalid signing keys: {}", e)))?;
    let registry = CachedSessionRegistry::new(
        RedisSessionRegistry::new(redis.clone(), config.jwt.refresh_ttl()),
        config.jwt.session_cache_ttl(),
        config.jwt.access_ttl(),
    );
    let token_service = Arc::new(TokenService::new(
        registry,
        Arc::new(keys),
        TokenServiceConfig::from_jwt_config(&config.jwt),
    ));

    let user_service = Arc::new(UserService::with_fill_queue(
        users,
        Arc::new(RedisUserCache::new(redis.clone())),
        Arc::new(BcryptHasher::default()),
        CACHE_FILL_CAPACITY,
    ));

    let auth_service = Arc::new(AuthService::new(
        code_service.clone(),
        user_service.clone(),
        token_service.clone(),
        AuthServiceConfig::default(),
    ));

    let guard = Arc::new(AuthGuard::new(token_service.clone()));

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        config,
        redis,
        code_service,
        token_service,
        user_service,
        auth_service,
        guard,
    })
}

/// Load application configuration
///
/// Sources, later ones winning:
/// 1. Built-in defaults
/// 2. `config/verigate.<environment>.{toml,yaml,json}` if present
/// 3. `VERIGATE__SECTION__FIELD` environment variables
///
/// A `.env` file is loaded first when present. Without any file or
/// prefixed variable the flat variables read by `AppConfig::from_env` apply.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present

    let base = AppConfig::from_env();
    let defaults = config::Config::try_from(&base)
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;

    let loaded: AppConfig = config::Config::builder()
        .add_source(defaults)
        .add_source(config::File::with_name(base.environment.config_file()).required(false))
        .add_source(
            config::Environment::with_prefix("VERIGATE")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;

    loaded.validate().map_err(InfrastructureError::Config)?;
    Ok(loaded)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A store call exceeded its response timeout
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Stored data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Cache(_) | InfrastructureError::Timeout(_) => {
                StoreError::StoreUnavailable { message: error.to_string() }.into()
            }
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failures_map_to_unavailable() {
        let error: DomainError = InfrastructureError::Timeout(2000).into();
        assert!(error.is_unavailable());

        let redis_error = redis::RedisError::from((redis::ErrorKind::IoError, "connection reset"));
        let error: DomainError = InfrastructureError::Cache(redis_error).into();
        assert!(error.is_unavailable());
    }

    #[test]
    fn test_other_failures_map_to_internal() {
        let error: DomainError = InfrastructureError::Config("bad".to_string()).into();
        assert!(matches!(error, DomainError::Internal { .. }));
        assert!(!error.is_unavailable());
    }
}
