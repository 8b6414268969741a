//! Development delivery adapter
//!
//! Writes the rendered message to the log instead of sending it. The code
//! itself is only logged at debug level.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::{debug, info};

use vg_core::errors::DomainResult;
use vg_core::services::DeliverMessage;
use vg_shared::config::SmsConfig;
use vg_shared::utils::email::mask_destination;

pub struct LogSmsService {
    config: SmsConfig,
    /// Counter for tracking number of messages sent
    message_count: AtomicU64,
}

impl LogSmsService {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config,
            message_count: AtomicU64::new(0),
        }
    }

    /// Get the total number of messages delivered
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for LogSmsService {
    fn default() -> Self {
        Self::new(SmsConfig::default())
    }
}

#[async_trait]
impl DeliverMessage for LogSmsService {
    async fn deliver(&self, template_id: &str, args: &[String], destination: &str) -> DomainResult<()> {
        let body = self.config.render(template_id, args);
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            event = "sms_logged",
            template_id,
            destination = %mask_destination(destination),
            count,
            "SMS delivery simulated"
        );
        debug!(body = %body, "Simulated SMS body");
        Ok(())
    }
}
