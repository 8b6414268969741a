use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::info;

use vg_core::domain::entities::session::Session;
use vg_core::errors::DomainResult;
use vg_core::repositories::SessionRegistry;

struct StoredSession {
    session: Session,
    expires_at: Instant,
}

/// Session registry held in process memory
///
/// Sessions expire after `ttl`, matching the Redis hash expiry.
pub struct MemorySessionRegistry {
    sessions: Mutex<HashMap<String, StoredSession>>,
    ttl: Duration,
}

impl MemorySessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Snapshot of a live session record
    pub async fn get(&self, session_id: &str) -> Option<Session> {
        let now = Instant::now();
        self.sessions
            .lock()
            .await
            .get(session_id)
            .filter(|stored| stored.expires_at > now)
            .map(|stored| stored.session.clone())
    }
}

#[async_trait]
impl SessionRegistry for MemorySessionRegistry {
    async fn register(&self, session: &Session) -> DomainResult<()> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, stored| stored.expires_at > now);
        sessions.insert(
            session.session_id.clone(),
            StoredSession {
                session: session.clone(),
                expires_at: now + self.ttl,
            },
        );

        info!(event = "session_registered", user_id = session.user_id, "Session opened");
        Ok(())
    }

    async fn revoke(&self, session_id: &str) -> DomainResult<()> {
        let known = match self.sessions.lock().await.get_mut(session_id) {
            Some(stored) => {
                stored.session.revoke();
                true
            }
            None => false,
        };

        info!(event = "session_revoked", known, "Session revoked");
        Ok(())
    }

    async fn is_active(&self, session_id: &str) -> DomainResult<bool> {
        let now = Instant::now();
        Ok(self
            .sessions
            .lock()
            .await
            .get(session_id)
            .is_some_and(|stored| stored.expires_at > now && stored.session.is_active()))
    }
}
