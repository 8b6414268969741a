//! Delivery provider configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use super::env_or;

/// Template used for login and verification codes
pub const CODE_TEMPLATE_ID: &str = "1877556";

/// SMS service configuration
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmsConfig {
    /// SMS service provider ("log" or "twilio")
    pub provider: String,

    /// Provider account identifier
    pub account_sid: String,

    /// Provider auth token
    pub auth_token: String,

    /// Sender phone number
    pub from_number: String,

    /// Provider API base URL
    pub api_base_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Template id used for verification codes
    pub code_template_id: String,

    /// Message templates keyed by template id, `{0}`, `{1}` … are replaced by args
    pub templates: HashMap<String, String>,
}

impl Default for SmsConfig {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert(
            CODE_TEMPLATE_ID.to_string(),
            "Your verification code is {0}. It expires in 10 minutes.".to_string(),
        );
        Self {
            provider: "log".to_string(),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            api_base_url: "https://api.twilio.com".to_string(),
            request_timeout_secs: 10,
            code_template_id: CODE_TEMPLATE_ID.to_string(),
            templates,
        }
    }
}

impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("provider", &self.provider)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from_number", &self.from_number)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("code_template_id", &self.code_template_id)
            .finish()
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("SMS_PROVIDER").unwrap_or(defaults.provider),
            account_sid: std::env::var("SMS_ACCOUNT_SID").unwrap_or_default(),
            auth_token: std::env::var("SMS_AUTH_TOKEN").unwrap_or_default(),
            from_number: std::env::var("SMS_FROM_NUMBER").unwrap_or_default(),
            api_base_url: std::env::var("SMS_API_BASE_URL").unwrap_or(defaults.api_base_url),
            request_timeout_secs: env_or("SMS_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            code_template_id: std::env::var("SMS_CODE_TEMPLATE_ID").unwrap_or(defaults.code_template_id),
            templates: defaults.templates,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Render a template with positional arguments
    ///
    /// Unknown templates fall back to the arguments joined by spaces.
    pub fn render(&self, template_id: &str, args: &[String]) -> String {
        match self.templates.get(template_id) {
            Some(template) => args
                .iter()
                .enumerate()
                .fold(template.clone(), |text, (i, arg)| text.replace(&format!("{{{}}}", i), arg)),
            None => args.join(" "),
        }
    }
}
