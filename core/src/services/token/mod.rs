//! Token service module for the dual-token session lifecycle
//!
//! This module handles:
//! - Access and refresh token minting bound to a session id
//! - Validation with a fixed rejection order and proactive renewal
//! - Refresh that keeps the session id
//! - HS512 key lookup by `kid` for key rollover

mod config;
mod key_ring;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use key_ring::{KeyProvider, KeyRing, SIGNING_ALGORITHM};
pub use service::TokenService;
