//! Twilio SMS Service Implementation
//!
//! Sends messages through the Twilio Messages REST API with a form POST.
//!
//! ## Features
//!
//! - Bounded request timeout
//! - Retry with exponential backoff on 429 and 5xx responses
//! - Security: phone number masking in logs

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info, warn};

use vg_core::errors::{DomainError, DomainResult};
use vg_core::services::DeliverMessage;
use vg_shared::config::SmsConfig;
use vg_shared::utils::phone::mask_phone_number;

use crate::InfrastructureError;

/// Twilio message length limit
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Attempts per message, the first one included
const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: reqwest::Client,
    config: SmsConfig,
    retry_delay: Duration,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    ///
    /// Fails when credentials are missing or the sender is not in E.164 form.
    pub fn new(config: SmsConfig) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "SMS_ACCOUNT_SID and SMS_AUTH_TOKEN must be set for the twilio provider".to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "SMS_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let client = reqwest::Client::builder().timeout(config.request_timeout()).build()?;

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Ok(Self {
            client,
            config,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Override the base delay between attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    /// Send SMS with retry logic
    ///
    /// # Returns
    /// * `Ok(String)` - Provider message SID
    async fn send_with_retry(&self, to: &str, body: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = self.retry_delay;

        loop {
            attempts += 1;

            let response = self
                .client
                .post(self.messages_url())
                .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
                .form(&[("To", to), ("From", self.config.from_number.as_str()), ("Body", body)])
                .send()
                .await;

            let retryable = match response {
                Ok(response) if response.status().is_success() => {
                    let message: MessageResponse = response.json().await?;
                    return Ok(message.sid);
                }
                Ok(response) => {
                    let status = response.status();
                    warn!(
                        "Twilio rejected SMS (attempt {}/{}): HTTP {}",
                        attempts, MAX_ATTEMPTS, status
                    );
                    if !(status.as_u16() == 429 || status.is_server_error()) {
                        return Err(InfrastructureError::Sms(format!("Twilio returned HTTP {}", status)));
                    }
                    InfrastructureError::Sms(format!("Twilio returned HTTP {}", status))
                }
                Err(e) => {
                    warn!("Failed to reach Twilio (attempt {}/{}): {}", attempts, MAX_ATTEMPTS, e);
                    InfrastructureError::Http(e)
                }
            };

            if attempts >= MAX_ATTEMPTS {
                return Err(retryable);
            }
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl DeliverMessage for TwilioSmsService {
    async fn deliver(&self, template_id: &str, args: &[String], destination: &str) -> DomainResult<()> {
        let body = self.config.render(template_id, args);
        if body.len() > MAX_MESSAGE_LENGTH {
            return Err(DomainError::Validation {
                message: format!("Message exceeds maximum length of {} characters", MAX_MESSAGE_LENGTH),
            });
        }

        match self.send_with_retry(destination, &body).await {
            Ok(sid) => {
                info!(
                    event = "sms_sent",
                    destination = %mask_phone_number(destination),
                    sid = %sid,
                    "SMS sent via Twilio"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    event = "sms_failed",
                    destination = %mask_phone_number(destination),
                    error = %e,
                    "SMS delivery via Twilio failed"
                );
                Err(e.into())
            }
        }
    }
}
