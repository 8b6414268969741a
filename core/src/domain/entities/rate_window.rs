//! Sliding-window admission counter.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use vg_shared::config::SlidingWindowConfig;

/// Sliding window parameters for a keyed admission counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateWindow {
    /// Counter key, e.g. `sms-limiter`
    pub key: String,

    /// Length of the trailing window
    pub window: Duration,

    /// Maximum admitted events inside one window
    pub threshold: u32,
}

impl RateWindow {
    pub fn new(key: impl Into<String>, window: Duration, threshold: u32) -> Self {
        Self {
            key: key.into(),
            window,
            threshold,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window.as_millis() as u64
    }
}

impl From<&SlidingWindowConfig> for RateWindow {
    fn from(config: &SlidingWindowConfig) -> Self {
        Self::new(config.key.clone(), config.window(), config.threshold)
    }
}

/// Admission log for one key
///
/// Holds the timestamps (milliseconds on a monotonic clock) of admitted
/// events still inside the window. Denied events are not recorded.
#[derive(Debug, Clone, Default)]
pub struct RateWindowCounter {
    admitted: VecDeque<u64>,
}

impl RateWindowCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides and records in one step
    ///
    /// # Arguments
    ///
    /// * `now_ms` - Current monotonic time in milliseconds
    /// * `window` - Window parameters
    ///
    /// # Returns
    ///
    /// `true` if the event was admitted and recorded
    pub fn admit(&mut self, now_ms: u64, window: &RateWindow) -> bool {
        self.prune(now_ms, window);

        if self.admitted.len() >= window.threshold as usize {
            return false;
        }
        self.admitted.push_back(now_ms);
        true
    }

    /// Drops events older than `now_ms - window`
    ///
    /// The window is closed: an event stamped exactly `now_ms - window`
    /// still counts.
    pub fn prune(&mut self, now_ms: u64, window: &RateWindow) {
        let floor = now_ms.saturating_sub(window.window_ms());
        while matches!(self.admitted.front(), Some(&at) if at < floor) {
            self.admitted.pop_front();
        }
    }

    /// Number of admitted events currently held
    pub fn len(&self) -> usize {
        self.admitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty()
    }
}
