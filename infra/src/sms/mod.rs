//! SMS Service Module
//!
//! Delivery adapters implementing `DeliverMessage` for verification codes.
//!
//! ## Providers
//!
//! - **log**: writes the rendered message to the tracing log (development)
//! - **twilio**: production delivery through the Twilio REST API
//!
//! Destinations are masked in every log line.

use async_trait::async_trait;

use vg_core::errors::DomainResult;
use vg_core::services::DeliverMessage;
use vg_shared::config::SmsConfig;

pub mod log_sms;
pub mod twilio;

pub use log_sms::LogSmsService;
pub use twilio::TwilioSmsService;

#[cfg(test)]
mod tests;

use crate::InfrastructureError;

/// The provider selected by configuration
pub enum SmsDelivery {
    Log(LogSmsService),
    Twilio(TwilioSmsService),
}

impl SmsDelivery {
    pub fn provider_name(&self) -> &'static str {
        match self {
            SmsDelivery::Log(_) => "log",
            SmsDelivery::Twilio(_) => "twilio",
        }
    }
}

#[async_trait]
impl DeliverMessage for SmsDelivery {
    async fn deliver(&self, template_id: &str, args: &[String], destination: &str) -> DomainResult<()> {
        match self {
            SmsDelivery::Log(service) => service.deliver(template_id, args, destination).await,
            SmsDelivery::Twilio(service) => service.deliver(template_id, args, destination).await,
        }
    }
}

/// Create an SMS service based on configuration
///
/// # Arguments
///
/// * `config` - SMS configuration containing provider settings
///
/// # Returns
///
/// The configured provider; an unknown provider name or incomplete Twilio
/// credentials are configuration errors.
pub fn create_sms_service(config: &SmsConfig) -> Result<SmsDelivery, InfrastructureError> {
    let service = match config.provider.as_str() {
        "log" | "mock" => SmsDelivery::Log(LogSmsService::new(config.clone())),
        "twilio" => SmsDelivery::Twilio(TwilioSmsService::new(config.clone())?),
        other => {
            return Err(InfrastructureError::Config(format!("Unknown SMS provider '{}'", other)));
        }
    };

    tracing::info!(provider = service.provider_name(), "SMS service initialized");
    Ok(service)
}
