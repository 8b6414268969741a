//! Shared configuration and utilities for the Verigate workspace
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types (JWT, Redis, throttling, SMS, logging)
//! - Utility functions (phone and e-mail validation, masking for logs)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CodeThrottleConfig, Environment, JwtConfig, LoggingConfig,
    RateLimitConfig, SlidingWindowConfig, SmsConfig,
};
pub use utils::{email, phone};
