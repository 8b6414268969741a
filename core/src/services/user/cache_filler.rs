//! Background population of the user cache.
//!
//! Profile reads hand freshly loaded users to a bounded queue drained by a
//! single worker task. The worker logs under its own `cache_filler` target;
//! a failed fill never reaches the reader.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

use crate::domain::entities::user::User;

use super::traits::UserCache;

const LOG_TARGET: &str = "cache_filler";

/// Worker task writing users into a cache off the request path
pub struct CacheFiller {
    sender: Mutex<Option<mpsc::Sender<User>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl CacheFiller {
    /// Spawns the worker on the current tokio runtime
    ///
    /// # Arguments
    ///
    /// * `cache` - Cache the worker writes to
    /// * `capacity` - Queue bound; fills beyond it are dropped
    pub fn start<C: UserCache + 'static>(cache: Arc<C>, capacity: usize) -> Self {
        let (sender, mut receiver) = mpsc::channel::<User>(capacity.max(1));

        let handle = tokio::spawn(async move {
            tracing::debug!(target: LOG_TARGET, event = "cache_filler_started", "Cache filler started");
            while let Some(user) = receiver.recv().await {
                match cache.set(&user).await {
                    Ok(()) => tracing::debug!(
                        target: LOG_TARGET,
                        user_id = user.id,
                        event = "cache_fill_completed",
                        "User cached"
                    ),
                    Err(e) => tracing::warn!(
                        target: LOG_TARGET,
                        user_id = user.id,
                        error = %e,
                        event = "cache_fill_failed",
                        "Failed to cache user"
                    ),
                }
            }
            tracing::debug!(target: LOG_TARGET, event = "cache_filler_stopped", "Cache filler drained");
        });

        Self {
            sender: Mutex::new(Some(sender)),
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Queues a user for caching without waiting
    ///
    /// # Returns
    ///
    /// `true` if queued; `false` if the queue is full or the filler is shut down
    pub async fn enqueue(&self, user: User) -> bool {
        let sender = self.sender.lock().await;
        let Some(sender) = sender.as_ref() else {
            return false;
        };

        match sender.try_send(user) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(user)) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    user_id = user.id,
                    event = "cache_fill_dropped",
                    "Cache fill queue full, dropping"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    pub async fn is_running(&self) -> bool {
        self.sender.lock().await.is_some()
    }

    /// Stops accepting work, lets queued fills finish for up to `grace`,
    /// then cancels the worker
    pub async fn shutdown(&self, grace: Duration) {
        self.sender.lock().await.take();

        let Some(mut handle) = self.handle.lock().await.take() else {
            return;
        };
        if tokio::time::timeout(grace, &mut handle).await.is_err() {
            handle.abort();
            tracing::warn!(
                target: LOG_TARGET,
                event = "cache_filler_cancelled",
                "Cache filler did not drain in time, cancelled"
            );
        }
    }
}
