//! Error type definitions for the throttling protocol, the token lifecycle,
//! backing stores and account operations.
//!
//! Messages stay generic: none of them reveals whether a destination ever
//! requested a code.

use thiserror::Error;

/// Verification code and delivery outcomes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// The delivery channel limiter denied admission
    #[error("Too many requests, please try again later")]
    RateLimited,

    /// A code was issued to this destination less than one cooldown ago
    #[error("Codes are sent too frequently, please wait before requesting another")]
    SendTooFrequent,

    /// The verification attempts for the current code are used up
    #[error("Too many verification attempts, please request a new code")]
    VerifyTooFrequent,

    /// The gateway refused or failed to deliver the message
    #[error("Message delivery failed: {message}")]
    DeliveryFailed { message: String },
}

/// Token validation and issuance failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, unknown key id, wrong token kind or unparsable structure
    #[error("Malformed token")]
    Malformed,

    #[error("Token expired")]
    Expired,

    /// The token was minted for a different client
    #[error("Token fingerprint mismatch")]
    FingerprintMismatch,

    #[error("Session revoked")]
    SessionRevoked,

    #[error("Token signing failed")]
    SigningFailed,
}

/// Backing store failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The limiter's store could not be reached or timed out
    #[error("Rate limiter unavailable: {message}")]
    LimiterUnavailable { message: String },

    /// The code store, session registry or user cache could not be reached or timed out
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// A record exists in a state the protocol never produces
    #[error("Inconsistent record at {key}")]
    Inconsistent { key: String },
}

/// Account-level authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown account or wrong password, intentionally indistinguishable
    #[error("Invalid e-mail or password")]
    InvalidCredentials,

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("User not found")]
    UserNotFound,

    #[error("E-mail already registered")]
    DuplicateEmail,
}
