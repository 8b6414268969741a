//! In-process implementations of the store capabilities
//!
//! Each operation runs inside one mutex-guarded critical section, which
//! gives the same atomicity the Redis scripts provide. Time comes from the
//! tokio clock so tests can pause and advance it. Nothing is shared between
//! processes: use these for single-node development and tests.

mod code_store;
mod rate_limiter;
mod session_registry;


pub use code_store::MemoryCodeStore;
pub use rate_limiter::MemorySlidingWindowLimiter;
pub use session_registry::MemorySessionRegistry;
