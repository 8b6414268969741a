//! Cache module for Redis-backed stores
//!
//! This module provides the Redis client and the stores built on it:
//! the Lua-scripted verification code store, the session registry and the
//! user profile cache. The sliding-window limiter lives with the other auth
//! services under `services::auth`.

pub mod code_store;
pub mod redis_client;
pub mod session_registry;
pub mod user_cache;

#[cfg(test)]
mod tests;

pub use code_store::RedisCodeStore;
pub use redis_client::RedisClient;
pub use session_registry::RedisSessionRegistry;
pub use user_cache::RedisUserCache;

// Re-export commonly used types
pub use vg_shared::config::CacheConfig;
