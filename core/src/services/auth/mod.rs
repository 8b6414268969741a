//! Authentication service module
//!
//! Login flows composed from the code, user and token services:
//! - Phone login with a one-time code
//! - E-mail and password login
//! - Token refresh and logout

mod config;
mod service;


pub use config::{AuthServiceConfig, LOGIN_BIZ};
pub use service::AuthService;
