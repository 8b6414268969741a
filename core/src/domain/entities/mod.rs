//! Domain entities representing core business objects.

pub mod rate_window;
pub mod session;
pub mod token;
pub mod user;
pub mod verification_code;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use rate_window::{RateWindow, RateWindowCounter};
pub use session::{Session, SessionState};
pub use token::{fingerprint_digest, Claims, TokenKind, TokenPair, ValidatedAccess, JWT_ISSUER};
pub use user::User;
pub use verification_code::{
    generate_code, CheckOutcome, CodeIdentity, ThrottledCode, CODE_LENGTH, MAX_ATTEMPTS,
};
