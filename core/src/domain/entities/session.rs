//! Session entity, the unit of revocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Session lifecycle state. `Revoked` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Active,
    Revoked,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Active => write!(f, "active"),
            SessionState::Revoked => write!(f, "revoked"),
        }
    }
}

impl FromStr for SessionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SessionState::Active),
            "revoked" => Ok(SessionState::Revoked),
            other => Err(format!("Unknown session state: {}", other)),
        }
    }
}

/// Server-side session record bound to every token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Random session identifier carried in the `sid` claim
    pub session_id: String,

    /// Owner of the session
    pub user_id: i64,

    pub created_at: DateTime<Utc>,

    pub state: SessionState,
}

impl Session {
    /// Opens a new active session for a user
    pub fn new(user_id: i64) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id,
            created_at: Utc::now(),
            state: SessionState::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Moves the session to `Revoked`; revoking twice is a no-op
    pub fn revoke(&mut self) {
        self.state = SessionState::Revoked;
    }
}
