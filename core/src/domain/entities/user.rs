//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered account
///
/// An account is reachable by e-mail (password login), by phone (code
/// login), or both. The id is assigned by the repository on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, `0` until persisted
    pub id: i64,

    pub email: Option<String>,

    /// Phone number in E.164 format
    pub phone: Option<String>,

    /// One-way password hash, absent for phone-only accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    pub nickname: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates an unsaved account for e-mail and password login
    ///
    /// # Arguments
    ///
    /// * `email` - Login e-mail address
    /// * `password_hash` - Hash produced by a `PasswordHasher`
    pub fn with_email(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: 0,
            email: Some(email.into()),
            phone: None,
            password_hash: Some(password_hash.into()),
            nickname: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Creates an unsaved account for code login
    pub fn with_phone(phone: impl Into<String>) -> Self {
        Self {
            id: 0,
            email: None,
            phone: Some(phone.into()),
            password_hash: None,
            nickname: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// Copy safe to hand to caches and API layers
    pub fn without_secrets(&self) -> Self {
        Self {
            password_hash: None,
            ..self.clone()
        }
    }
}
