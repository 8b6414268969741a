//! User service module
//!
//! Account operations around the identity store:
//! - E-mail signup and password login
//! - Find-or-create by phone for code login
//! - Cache-aside profile reads with background cache population

mod cache_filler;
mod service;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use cache_filler::CacheFiller;
pub use service::UserService;
pub use traits::{PasswordHasher, UserCache};
