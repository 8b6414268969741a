//! Code service module for throttled one-time codes
//!
//! This module composes the verification-code workflow:
//! - Channel-wide sliding-window admission before every send
//! - Atomic issue with send cooldown through a `CodeStore`
//! - Delivery through a pluggable gateway
//! - Verification with a server-side attempt cap

mod config;
mod delivery;
mod service;
mod traits;
mod types;


pub use config::CodeServiceConfig;
pub use delivery::RateLimitedDelivery;
pub use service::CodeService;
pub use traits::{CodeStore, DeliverMessage, RateLimiter};
pub use types::SendCodeResult;
