use std::time::Duration;

use vg_core::errors::DomainError;
use vg_core::services::DeliverMessage;
use vg_shared::config::SmsConfig;
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::sms::TwilioSmsService;

const MESSAGES_PATH: &str = "/2010-04-01/Accounts/ACtest/Messages.json";

fn config(base_url: &str) -> SmsConfig {
    SmsConfig {
        provider: "twilio".to_string(),
        account_sid: "ACtest".to_string(),
        auth_token: "secret".to_string(),
        from_number: "+15550000000".to_string(),
        api_base_url: base_url.to_string(),
        request_timeout_secs: 2,
        ..SmsConfig::default()
    }
}

fn service(base_url: &str) -> TwilioSmsService {
    TwilioSmsService::new(config(base_url))
        .unwrap()
        .with_retry_delay(Duration::from_millis(1))
}

#[test]
fn test_sender_must_be_e164() {
    let mut config = config("http://localhost");
    config.from_number = "15550000000".to_string();

    assert!(TwilioSmsService::new(config).is_err());
}

#[tokio::test]
async fn test_delivers_rendered_template() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .and(header_exists("authorization"))
        .and(body_string_contains("042137"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"sid": "SM123"})))
        .expect(1)
        .mount(&server)
        .await;

    service(&server.uri())
        .deliver("1877556", &["042137".to_string()], "+15551230001")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let result = service(&server.uri())
        .deliver("1877556", &["042137".to_string()], "+15551230001")
        .await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server.uri())
        .deliver("1877556", &["042137".to_string()], "+15551230001")
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_overlong_message_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let result = service(&server.uri())
        .deliver("unknown-template", &["x".repeat(2000)], "+15551230001")
        .await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
}
