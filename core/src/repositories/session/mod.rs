pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod cached;

pub use cached::CachedSessionRegistry;
pub use r#trait::SessionRegistry;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockSessionRegistry;

#[cfg(test)]
mod tests;
