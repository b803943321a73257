//! Application configuration module
//!
//! Configuration is read from environment variables with the `PAYPAL_RELAY`
//! prefix using the `config` and `dotenvy` crates. Nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use paypal_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod payment;
mod server;
mod webhook;

pub use error::{ConfigError, ValidationError};
pub use payment::{PaymentConfig, PaypalMode};
pub use server::{Environment, ServerConfig};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// PayPal credentials and mode
    pub paypal: PaymentConfig,

    /// Webhook receiver route
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables with the `PAYPAL_RELAY`
    /// prefix.
    ///
    /// # Environment Variable Format
    ///
    /// - `PAYPAL_RELAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PAYPAL_RELAY__PAYPAL__CLIENT_ID=...` -> `paypal.client_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAYPAL_RELAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.paypal.validate(&self.server.environment)?;
        self.webhook.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("PAYPAL_RELAY__PAYPAL__CLIENT_ID", "client-id");
        env::set_var("PAYPAL_RELAY__PAYPAL__CLIENT_SECRET", "client-secret");
        env::set_var("PAYPAL_RELAY__PAYPAL__WEBHOOK_ID", "WH-123");
    }

    fn clear_env() {
        env::remove_var("PAYPAL_RELAY__PAYPAL__CLIENT_ID");
        env::remove_var("PAYPAL_RELAY__PAYPAL__CLIENT_SECRET");
        env::remove_var("PAYPAL_RELAY__PAYPAL__WEBHOOK_ID");
        env::remove_var("PAYPAL_RELAY__PAYPAL__MODE");
        env::remove_var("PAYPAL_RELAY__SERVER__PORT");
        env::remove_var("PAYPAL_RELAY__SERVER__ENVIRONMENT");
        env::remove_var("PAYPAL_RELAY__WEBHOOK__PATH");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.paypal.client_id, "client-id");
        assert_eq!(config.paypal.webhook_id, "WH-123");
        assert_eq!(config.paypal.mode, PaypalMode::Sandbox);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.webhook.path, "/api/webhooks/paypal");
        assert_eq!(config.paypal.request_timeout_secs, 30);
    }

    #[test]
    fn test_missing_credentials_fail_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_production_requires_live_mode() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PAYPAL_RELAY__SERVER__ENVIRONMENT", "production");
        let sandbox = AppConfig::load();
        env::set_var("PAYPAL_RELAY__PAYPAL__MODE", "live");
        let live = AppConfig::load();
        clear_env();

        let sandbox = sandbox.unwrap();
        assert!(sandbox.is_production());
        assert_eq!(
            sandbox.validate(),
            Err(ValidationError::SandboxInProduction)
        );
        assert!(live.unwrap().validate().is_ok());
    }

    #[test]
    fn test_custom_port_and_webhook_path() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PAYPAL_RELAY__SERVER__PORT", "3000");
        env::set_var("PAYPAL_RELAY__WEBHOOK__PATH", "/hooks/paypal");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.webhook.path, "/hooks/paypal");
    }
}
