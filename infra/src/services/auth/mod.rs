//! Authentication-related infrastructure services

pub mod password;
pub mod rate_limiter;


pub use password::BcryptHasher;
pub use rate_limiter::RedisSlidingWindowLimiter;
