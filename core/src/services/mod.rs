//! Business services containing domain logic and use cases.

pub mod auth;
pub mod code;
pub mod guard;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use code::{
    CodeService, CodeServiceConfig, CodeStore, DeliverMessage, RateLimitedDelivery, RateLimiter,
    SendCodeResult,
};
pub use guard::{extract_bearer_token, AccessValidator, AuthGuard, GuardDecision};
pub use token::{KeyProvider, KeyRing, TokenService, TokenServiceConfig};
pub use user::{CacheFiller, PasswordHasher, UserCache, UserService};
