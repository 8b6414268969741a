pub mod session;
pub mod user;

pub use session::{CachedSessionRegistry, SessionRegistry};
pub use user::UserRepository;

#[cfg(test)]
pub use session::MockSessionRegistry;
#[cfg(test)]
pub use user::MockUserRepository;
