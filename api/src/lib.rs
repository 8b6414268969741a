//! HTTP surface for Verigate
//!
//! Request authentication for actix-web applications: the `JwtAuth`
//! middleware validates access tokens through `vg_core::AuthGuard` and the
//! `AuthContext` / `OptionalAuth` extractors expose the result to handlers.

pub mod middleware;

pub use middleware::auth::{AuthContext, JwtAuth, OptionalAuth, RENEWED_TOKEN_HEADER};
