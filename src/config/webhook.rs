//! Webhook endpoint configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Where PayPal delivers webhook notifications
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Route path of the webhook receiver
    #[serde(default = "default_path")]
    pub path: String,
}

impl WebhookConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.path.starts_with('/') {
            return Err(ValidationError::InvalidWebhookPath);
        }
        Ok(())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "/api/webhooks/paypal".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path() {
        let config = WebhookConfig::default();
        assert_eq!(config.path, "/api/webhooks/paypal");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_relative_path_rejected() {
        let config = WebhookConfig {
            path: "webhooks/paypal".to_string(),
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidWebhookPath));
    }
}
