use vg_core::services::DeliverMessage;
use vg_shared::config::SmsConfig;

use crate::sms::{create_sms_service, LogSmsService, SmsDelivery};

#[tokio::test]
async fn test_log_service_counts_deliveries() {
    let service = LogSmsService::default();

    service
        .deliver("1877556", &["123456".to_string()], "+15551230001")
        .await
        .unwrap();
    service.deliver("1877556", &["654321".to_string()], "+15551230001").await.unwrap();

    assert_eq!(service.message_count(), 2);
}

#[test]
fn test_create_log_service_by_default() {
    let service = create_sms_service(&SmsConfig::default()).unwrap();
    assert!(matches!(service, SmsDelivery::Log(_)));
    assert_eq!(service.provider_name(), "log");
}

#[test]
fn test_unknown_provider_is_a_config_error() {
    let config = SmsConfig {
        provider: "carrier-pigeon".to_string(),
        ..SmsConfig::default()
    };
    assert!(create_sms_service(&config).is_err());
}

#[test]
fn test_twilio_without_credentials_is_a_config_error() {
    let config = SmsConfig {
        provider: "twilio".to_string(),
        ..SmsConfig::default()
    };
    assert!(create_sms_service(&config).is_err());
}
