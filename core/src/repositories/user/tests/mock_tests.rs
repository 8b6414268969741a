//! Unit tests for mock user repository

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

#[tokio::test]
async fn test_mock_repository_create_assigns_ids() {
    let repo = MockUserRepository::new();

    let first = repo.create(User::with_email("a@example.com", "h")).await.unwrap();
    let second = repo.create(User::with_phone("+15551230001")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(repo.find_by_id(2).await.unwrap().is_some());
}

#[tokio::test]
async fn test_mock_repository_lookup_by_email_and_phone() {
    let repo = MockUserRepository::new();
    repo.create(User::with_email("a@example.com", "h")).await.unwrap();
    repo.create(User::with_phone("+15551230001")).await.unwrap();

    assert!(repo.find_by_email("a@example.com").await.unwrap().is_some());
    assert!(repo.find_by_email("b@example.com").await.unwrap().is_none());
    assert!(repo.find_by_phone("+15551230001").await.unwrap().is_some());
}

#[tokio::test]
async fn test_mock_repository_rejects_duplicate_email() {
    let repo = MockUserRepository::new();
    repo.create(User::with_email("a@example.com", "h")).await.unwrap();

    let result = repo.create(User::with_email("a@example.com", "h2")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateEmail))
    ));
}
