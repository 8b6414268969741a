//! Framework-agnostic request authentication
//!
//! The HTTP layer hands the guard the request path and the raw
//! `Authorization` and `User-Agent` header values; the guard decides.

mod auth_guard;


pub use auth_guard::{extract_bearer_token, AccessValidator, AuthGuard, GuardDecision};
