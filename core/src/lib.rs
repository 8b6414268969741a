//! # Verigate Core
//!
//! Core domain layer for the Verigate backend.
//! This crate contains the verification-code throttling protocol, the
//! dual-token session lifecycle, the capability traits the infrastructure
//! layer implements, and the error types shared by every layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
