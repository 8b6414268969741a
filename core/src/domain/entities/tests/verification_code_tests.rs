//! Unit tests for the throttled code record

use std::collections::HashSet;
use std::time::Duration;

use vg_shared::config::{CodeThrottleConfig, SuccessPolicy};

use crate::domain::entities::verification_code::*;

fn record(code: &str) -> ThrottledCode {
    ThrottledCode::new(
        CodeIdentity::new("login", "+15551230001"),
        code.to_string(),
        MAX_ATTEMPTS,
    )
}

#[test]
fn test_generate_code_format() {
    for _ in 0..200 {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_generate_code_varies() {
    let codes: HashSet<String> = (0..100).map(|_| generate_code()).collect();
    assert!(codes.len() > 90);
}

#[test]
fn test_identity_keys() {
    let identity = CodeIdentity::new("login", "+15551230001");
    assert_eq!(identity.code_key(), "phone_code:login:+15551230001");
    assert_eq!(identity.counter_key(), "phone_code:login:+15551230001:cnt");
}

#[test]
fn test_correct_code_matches() {
    let mut code = record("123456");
    assert_eq!(code.check("123456", SuccessPolicy::SingleUse), CheckOutcome::Matched);
    assert!(code.consumed);
}

#[test]
fn test_single_use_rejects_replay() {
    let mut code = record("123456");
    assert_eq!(code.check("123456", SuccessPolicy::SingleUse), CheckOutcome::Matched);
    assert_eq!(code.check("123456", SuccessPolicy::SingleUse), CheckOutcome::Mismatched);
    // A consumed record spends no attempts
    assert_eq!(code.attempts_remaining, MAX_ATTEMPTS - 1);
}

#[test]
fn test_replay_within_ttl_allows_replay_while_attempts_remain() {
    let mut code = record("123456");
    let policy = SuccessPolicy::ReplayWithinTtl;
    assert_eq!(code.check("123456", policy), CheckOutcome::Matched);
    assert_eq!(code.check("123456", policy), CheckOutcome::Matched);
    assert_eq!(code.check("123456", policy), CheckOutcome::Matched);
    assert_eq!(code.check("123456", policy), CheckOutcome::Exhausted);
}

#[test]
fn test_three_wrong_attempts_then_exhausted() {
    let mut code = record("123456");
    for _ in 0..MAX_ATTEMPTS {
        assert_eq!(code.check("000000", SuccessPolicy::SingleUse), CheckOutcome::Mismatched);
    }
    assert_eq!(code.attempts_remaining, 0);

    // Regardless of correctness
    assert_eq!(code.check("123456", SuccessPolicy::SingleUse), CheckOutcome::Exhausted);
    assert_eq!(code.attempts_remaining, 0);
}

#[test]
fn test_correct_code_on_last_attempt() {
    let mut code = record("123456");
    code.check("000000", SuccessPolicy::SingleUse);
    code.check("111111", SuccessPolicy::SingleUse);
    assert_eq!(code.check("123456", SuccessPolicy::SingleUse), CheckOutcome::Matched);
}

#[test]
fn test_blocks_resend_during_cooldown() {
    let config = CodeThrottleConfig::default();

    // Just issued
    assert!(ThrottledCode::blocks_resend(Duration::from_secs(600), &config));
    // 59 s after issue
    assert!(ThrottledCode::blocks_resend(Duration::from_secs(541), &config));
    // Exactly one cooldown after issue
    assert!(!ThrottledCode::blocks_resend(Duration::from_secs(540), &config));
    assert!(!ThrottledCode::blocks_resend(Duration::from_secs(10), &config));
}
