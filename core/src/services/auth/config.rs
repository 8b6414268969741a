//! Configuration for the authentication service

/// Business context used for login codes
pub const LOGIN_BIZ: &str = "login";

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Business context login codes are issued under
    pub login_biz: String,
    /// Create an account on first successful code login
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            login_biz: LOGIN_BIZ.to_string(),
            allow_registration: true,
        }
    }
}
