//! Mock implementation of SessionRegistry for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::session::Session;
use crate::errors::{DomainResult, StoreError};

use super::r#trait::SessionRegistry;

/// Mock session registry for testing
#[derive(Clone, Default)]
pub struct MockSessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    lookups: Arc<AtomicUsize>,
    should_fail: Arc<AtomicBool>,
}

impl MockSessionRegistry {
    /// Create a new mock registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the store were down
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `is_active` calls that reached this registry
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Revoke without going through any decorator
    pub async fn revoke_directly(&self, session_id: &str) {
        if let Some(session) = self.sessions.write().await.get_mut(session_id) {
            session.revoke();
        }
    }

    pub async fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().await.get(session_id).cloned()
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(StoreError::StoreUnavailable {
                message: "mock registry down".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRegistry for MockSessionRegistry {
    async fn register(&self, session: &Session) -> DomainResult<()> {
        self.check_available()?;
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn revoke(&self, session_id: &str) -> DomainResult<()> {
        self.check_available()?;
        self.revoke_directly(session_id).await;
        Ok(())
    }

    async fn is_active(&self, session_id: &str) -> DomainResult<bool> {
        self.check_available()?;
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .sessions
            .read()
            .await
            .get(session_id)
            .map(Session::is_active)
            .unwrap_or(false))
    }
}
