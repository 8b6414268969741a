//! Unit tests for the caching session registry decorator

use std::time::Duration;

use crate::domain::entities::session::Session;
use crate::errors::{DomainError, StoreError};
use crate::repositories::session::{CachedSessionRegistry, MockSessionRegistry, SessionRegistry};

fn cached(inner: MockSessionRegistry, ttl_secs: u64) -> CachedSessionRegistry<MockSessionRegistry> {
    CachedSessionRegistry::new(inner, Duration::from_secs(ttl_secs), Duration::from_secs(3600))
}

#[tokio::test]
async fn test_ttl_is_clamped_to_access_ttl() {
    let registry = CachedSessionRegistry::new(
        MockSessionRegistry::new(),
        Duration::from_secs(120),
        Duration::from_secs(60),
    );
    assert_eq!(registry.ttl(), Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_positive_answers_are_cached() {
    let inner = MockSessionRegistry::new();
    let registry = cached(inner.clone(), 5);
    let session = Session::new(1);
    registry.register(&session).await.unwrap();

    assert!(registry.is_active(&session.session_id).await.unwrap());
    assert!(registry.is_active(&session.session_id).await.unwrap());
    assert_eq!(inner.lookups(), 1);

    tokio::time::advance(Duration::from_secs(6)).await;
    assert!(registry.is_active(&session.session_id).await.unwrap());
    assert_eq!(inner.lookups(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_negative_answers_are_not_cached() {
    let inner = MockSessionRegistry::new();
    let registry = cached(inner.clone(), 5);

    assert!(!registry.is_active("unknown").await.unwrap());
    assert!(!registry.is_active("unknown").await.unwrap());
    assert_eq!(inner.lookups(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_revoke_through_decorator_is_immediate() {
    let inner = MockSessionRegistry::new();
    let registry = cached(inner.clone(), 5);
    let session = Session::new(1);
    registry.register(&session).await.unwrap();
    assert!(registry.is_active(&session.session_id).await.unwrap());

    registry.revoke(&session.session_id).await.unwrap();
    assert!(!registry.is_active(&session.session_id).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_external_revoke_visible_after_ttl() {
    let inner = MockSessionRegistry::new();
    let registry = cached(inner.clone(), 5);
    let session = Session::new(1);
    registry.register(&session).await.unwrap();
    assert!(registry.is_active(&session.session_id).await.unwrap());

    inner.revoke_directly(&session.session_id).await;
    assert!(registry.is_active(&session.session_id).await.unwrap());

    tokio::time::advance(Duration::from_secs(5)).await;
    assert!(!registry.is_active(&session.session_id).await.unwrap());
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let inner = MockSessionRegistry::new();
    let registry = cached(inner.clone(), 5);
    inner.set_should_fail(true);

    let result = registry.is_active("any").await;
    assert!(matches!(
        result,
        Err(DomainError::Store(StoreError::StoreUnavailable { .. }))
    ));
}
