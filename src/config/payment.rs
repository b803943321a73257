//! PayPal provider configuration

use serde::Deserialize;
use std::fmt;

use crate::adapters::paypal::{LIVE_BASE_URL, SANDBOX_BASE_URL};

use super::error::ValidationError;
use super::server::Environment;

/// Which PayPal environment the relay talks to
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaypalMode {
    #[default]
    Sandbox,
    Live,
}

impl PaypalMode {
    /// REST API base URL for this mode
    pub fn base_url(&self) -> &'static str {
        match self {
            PaypalMode::Sandbox => SANDBOX_BASE_URL,
            PaypalMode::Live => LIVE_BASE_URL,
        }
    }
}

/// PayPal REST credentials and webhook registration
#[derive(Clone, Deserialize)]
pub struct PaymentConfig {
    /// Sandbox or live
    #[serde(default)]
    pub mode: PaypalMode,

    /// REST app client id
    pub client_id: String,

    /// REST app client secret
    pub client_secret: String,

    /// Id of the webhook registered with PayPal, used for signature verification
    pub webhook_id: String,

    /// Overrides the mode's base URL (used against local stubs)
    pub api_base_url: Option<String>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl PaymentConfig {
    /// Base URL outbound calls are sent to
    pub fn effective_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or_else(|| self.mode.base_url())
    }

    /// Validate payment configuration
    ///
    /// Production deployments must run against the live API.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.client_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("paypal.client_id"));
        }
        if self.client_secret.trim().is_empty() {
            return Err(ValidationError::MissingRequired("paypal.client_secret"));
        }
        if self.webhook_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("paypal.webhook_id"));
        }
        if let Some(url) = &self.api_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidApiBaseUrl);
            }
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if *environment == Environment::Production && self.mode == PaypalMode::Sandbox {
            return Err(ValidationError::SandboxInProduction);
        }
        Ok(())
    }
}

impl fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("mode", &self.mode)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("webhook_id", &self.webhook_id)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn default_request_timeout() -> u64 {
    30
}
