use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

use vg_core::domain::entities::rate_window::{RateWindow, RateWindowCounter};
use vg_core::errors::DomainResult;
use vg_core::services::RateLimiter;
use vg_shared::config::SlidingWindowConfig;

/// Sliding-window limiter held in process memory
///
/// Keys whose window has emptied are swept at most once per window length,
/// so the map only holds keys seen within the last window.
pub struct MemorySlidingWindowLimiter {
    state: Mutex<LimiterState>,
    window: RateWindow,
    epoch: Instant,
}

#[derive(Default)]
struct LimiterState {
    counters: HashMap<String, RateWindowCounter>,
    last_sweep_ms: u64,
}

impl LimiterState {
    fn sweep(&mut self, now_ms: u64, window: &RateWindow) {
        if now_ms.saturating_sub(self.last_sweep_ms) < window.window_ms() {
            return;
        }
        self.counters.retain(|_, counter| {
            counter.prune(now_ms, window);
            !counter.is_empty()
        });
        self.last_sweep_ms = now_ms;
    }
}

impl MemorySlidingWindowLimiter {
    pub fn new(config: &SlidingWindowConfig) -> Self {
        Self {
            state: Mutex::new(LimiterState::default()),
            window: RateWindow::from(config),
            epoch: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Admitted events currently inside the window for `key`
    pub async fn in_window(&self, key: &str) -> usize {
        let now_ms = self.now_ms();
        let mut state = self.state.lock().await;
        match state.counters.get_mut(key) {
            Some(counter) => {
                counter.prune(now_ms, &self.window);
                counter.len()
            }
            None => 0,
        }
    }

    /// Number of keys currently tracked
    pub async fn tracked_keys(&self) -> usize {
        let now_ms = self.now_ms();
        let mut state = self.state.lock().await;
        state.sweep(now_ms, &self.window);
        state.counters.len()
    }
}

#[async_trait]
impl RateLimiter for MemorySlidingWindowLimiter {
    async fn admit(&self, key: &str) -> DomainResult<bool> {
        let now_ms = self.now_ms();
        let mut state = self.state.lock().await;
        state.sweep(now_ms, &self.window);
        let admitted = state
            .counters
            .entry(key.to_string())
            .or_default()
            .admit(now_ms, &self.window);

        if !admitted {
            warn!(
                event = "rate_limited",
                key = %key,
                window_ms = self.window.window_ms(),
                threshold = self.window.threshold,
                "Sliding window full"
            );
        }
        Ok(admitted)
    }
}
