//! Unit tests for domain error types

use crate::errors::*;

#[test]
fn test_throttling_outcomes_are_classified() {
    assert!(DomainError::from(CodeError::RateLimited).is_throttled());
    assert!(DomainError::from(CodeError::SendTooFrequent).is_throttled());
    assert!(DomainError::from(CodeError::VerifyTooFrequent).is_throttled());

    let delivery = DomainError::from(CodeError::DeliveryFailed {
        message: "gateway down".to_string(),
    });
    assert!(!delivery.is_throttled());
}

#[test]
fn test_unavailable_errors() {
    let limiter = DomainError::from(StoreError::LimiterUnavailable {
        message: "timeout".to_string(),
    });
    let store = DomainError::from(StoreError::StoreUnavailable {
        message: "connection refused".to_string(),
    });
    let inconsistent = DomainError::from(StoreError::Inconsistent {
        key: "phone_code:login:+15551230001".to_string(),
    });

    assert!(limiter.is_unavailable());
    assert!(store.is_unavailable());
    assert!(!inconsistent.is_unavailable());
}

#[test]
fn test_token_rejections() {
    assert!(DomainError::from(TokenError::Expired).is_token_rejection());
    assert!(DomainError::from(TokenError::SessionRevoked).is_token_rejection());
    assert!(DomainError::Unauthorized.is_token_rejection());
    assert!(!DomainError::from(CodeError::RateLimited).is_token_rejection());
}

#[test]
fn test_transparent_messages() {
    let error = DomainError::from(TokenError::FingerprintMismatch);
    assert_eq!(error.to_string(), "Token fingerprint mismatch");

    let error = DomainError::from(AuthError::InvalidCredentials);
    assert_eq!(error.to_string(), "Invalid e-mail or password");
}

#[test]
fn test_messages_do_not_reveal_destinations() {
    for error in [
        CodeError::RateLimited,
        CodeError::SendTooFrequent,
        CodeError::VerifyTooFrequent,
    ] {
        let message = error.to_string();
        assert!(!message.contains('+'));
        assert!(!message.contains("not found"));
    }
}
