//! Unit tests for key rollover

use std::sync::Arc;

use vg_shared::config::{JwtConfig, SigningKeyConfig};

use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockSessionRegistry, SessionRegistry};
use crate::services::token::{KeyProvider, KeyRing, TokenService, TokenServiceConfig};

const UA: &str = "Mozilla/5.0";

#[test]
fn test_ring_from_config() {
    let mut config = JwtConfig::new("current-secret");
    config.key_id = "k2".to_string();
    config.previous_keys = vec![SigningKeyConfig {
        key_id: "k1".to_string(),
        secret: "old-secret".to_string(),
    }];

    let ring = KeyRing::from_config(&config).unwrap();
    assert_eq!(ring.current_key_id(), "k2");
    assert!(ring.contains("k1"));
    assert!(ring.contains("k2"));
    assert!(ring.verification_key("k3").is_none());
}

#[test]
fn test_ring_rejects_bad_keys() {
    assert!(KeyRing::new("", b"secret").is_err());
    assert!(KeyRing::new("k1", b"").is_err());

    let ring = KeyRing::new("k1", b"secret").unwrap();
    assert!(ring.clone().with_previous_key("k1", b"other").is_err());
}

#[test]
fn test_debug_does_not_leak_secrets() {
    let ring = KeyRing::new("k1", b"super-secret-value").unwrap();
    let debug = format!("{:?}", ring);
    assert!(debug.contains("k1"));
    assert!(!debug.contains("super-secret-value"));
}

#[tokio::test]
async fn test_rollover_keeps_old_tokens_valid() {
    let registry = MockSessionRegistry::new();
    let old_ring = Arc::new(KeyRing::new("k1", b"old-secret").unwrap());
    let old_service = TokenService::new(registry.clone(), old_ring, TokenServiceConfig::default());
    let pair = old_service.issue_pair(1, UA).await.unwrap();

    let new_ring = KeyRing::new("k2", b"new-secret")
        .unwrap()
        .with_previous_key("k1", b"old-secret")
        .unwrap();
    let new_service = TokenService::new(registry.clone(), Arc::new(new_ring), TokenServiceConfig::default());

    assert!(new_service.validate_access(&pair.access_token, UA).await.is_ok());

    // New tokens are signed with k2 and the old service cannot read them
    let refreshed = new_service.refresh(&pair.refresh_token, UA).await.unwrap();
    assert!(matches!(
        old_service.validate_access(&refreshed.access_token, UA).await,
        Err(DomainError::Token(TokenError::Malformed))
    ));
    assert!(registry.is_active(&pair.session_id).await.unwrap());
}

#[tokio::test]
async fn test_retired_key_is_malformed() {
    let registry = MockSessionRegistry::new();
    let old_service = TokenService::new(
        registry.clone(),
        Arc::new(KeyRing::new("k1", b"old-secret").unwrap()),
        TokenServiceConfig::default(),
    );
    let pair = old_service.issue_pair(1, UA).await.unwrap();

    let new_service = TokenService::new(
        registry,
        Arc::new(KeyRing::new("k2", b"new-secret").unwrap()),
        TokenServiceConfig::default(),
    );
    assert!(matches!(
        new_service.validate_access(&pair.access_token, UA).await,
        Err(DomainError::Token(TokenError::Malformed))
    ));
}
