//! Unit tests for the user service

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use super::mocks::{MockHasher, MockUserCache};
use crate::errors::{AuthError, DomainError};
use crate::repositories::MockUserRepository;
use crate::services::user::UserService;

type TestService = UserService<MockUserRepository, MockUserCache, MockHasher>;

fn create_service() -> (TestService, MockUserRepository, Arc<MockUserCache>) {
    let repository = MockUserRepository::new();
    let cache = Arc::new(MockUserCache::new());
    let service = UserService::new(Arc::new(repository.clone()), cache.clone(), Arc::new(MockHasher));
    (service, repository, cache)
}

#[tokio::test]
async fn test_signup_and_login() {
    let (service, _, _) = create_service();

    let user = service.signup("ann@example.com", "correct#horse1").await.unwrap();
    assert!(user.id > 0);
    assert!(user.password_hash.is_none());

    let logged_in = service.login("ann@example.com", "correct#horse1").await.unwrap();
    assert_eq!(logged_in.id, user.id);
    assert!(logged_in.password_hash.is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let (service, _, _) = create_service();
    service.signup("ann@example.com", "correct#horse1").await.unwrap();

    let result = service.signup("ann@example.com", "another#pass2").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::DuplicateEmail))));
}

#[tokio::test]
async fn test_signup_validation() {
    let (service, _, _) = create_service();

    assert!(matches!(
        service.signup("not-an-email", "correct#horse1").await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        service.signup("ann@example.com", "short").await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_signup_requires_letter_digit_and_symbol() {
    let (service, _, _) = create_service();

    for weak in ["correcthorse1", "correct#horse", "12345678#", "correct horse#1"] {
        assert!(
            matches!(service.signup("ann@example.com", weak).await, Err(DomainError::Validation { .. })),
            "{} should be rejected",
            weak
        );
    }
    assert!(service.signup("ann@example.com", "correct#horse1").await.is_ok());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (service, _, _) = create_service();
    service.signup("ann@example.com", "correct#horse1").await.unwrap();
    service.find_or_create_by_phone("+15551230001").await.unwrap();

    let wrong_password = service.login("ann@example.com", "wrong-password").await.unwrap_err();
    let unknown_user = service.login("bob@example.com", "correct#horse1").await.unwrap_err();

    assert!(matches!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_find_or_create_by_phone() {
    let (service, _, _) = create_service();

    let created = service.find_or_create_by_phone("+15551230001").await.unwrap();
    let found = service.find_or_create_by_phone("+15551230001").await.unwrap();
    assert_eq!(created.id, found.id);

    assert!(matches!(
        service.find_or_create_by_phone("5551230001").await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_profile_fills_cache_in_background() {
    let (service, repository, cache) = create_service();
    let user = service.signup("ann@example.com", "correct#horse1").await.unwrap();

    let profile = service.profile(user.id).await.unwrap();
    assert_eq!(profile.id, user.id);
    assert_eq!(repository.reads(), 1);

    service.shutdown(Duration::from_secs(1)).await;
    assert!(cache.contains(user.id));
    assert!(cache.users.lock().unwrap()[&user.id].password_hash.is_none());
}

#[tokio::test]
async fn test_profile_cache_hit_skips_repository() {
    let (service, repository, cache) = create_service();
    let user = service.signup("ann@example.com", "correct#horse1").await.unwrap();
    cache.users.lock().unwrap().insert(user.id, user.clone());

    let profile = service.profile(user.id).await.unwrap();
    assert_eq!(profile, user);
    assert_eq!(repository.reads(), 0);
}

#[tokio::test]
async fn test_profile_survives_cache_failures() {
    let (service, _, cache) = create_service();
    let user = service.signup("ann@example.com", "correct#horse1").await.unwrap();
    cache.fail_reads.store(true, Ordering::SeqCst);
    cache.fail_writes.store(true, Ordering::SeqCst);

    let profile = service.profile(user.id).await.unwrap();
    assert_eq!(profile.id, user.id);

    service.shutdown(Duration::from_secs(1)).await;
    assert!(!cache.contains(user.id));
}

#[tokio::test]
async fn test_profile_unknown_user() {
    let (service, _, _) = create_service();
    assert!(matches!(
        service.profile(99).await,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}
