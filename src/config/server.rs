//! Listener and runtime settings for the relay process.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

use super::error::ValidationError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str = "info,paypal_relay=debug,tower_http=info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where the relay listens and how it treats inbound requests.
///
/// Every field is optional in the environment; missing ones fall back to
/// [`ServerConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Upper bound for a whole inbound request, provider calls included.
    pub request_timeout_secs: u64,
    /// Comma-separated browser origins; CORS stays off when unset.
    pub cors_origins: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]).to_string(),
            port: DEFAULT_PORT,
            environment: Environment::default(),
            log_level: DEFAULT_LOG_FILTER.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cors_origins: None,
        }
    }
}

/// Deployment stage. Only `development` exposes failure detail to callers.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ServerConfig {
    /// Bind address. The host must be a literal IP.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ValidationError::InvalidAddress(format!("{}:{}", self.host, self.port)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn is_diagnostic(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured CORS origins, blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .flat_map(|origins| origins.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_in_development() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert!(config.is_diagnostic());
        assert!(!config.is_production());
        assert!(config.cors_origins_list().is_empty());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn ipv6_host_is_accepted() {
        let config = ServerConfig {
            host: "::1".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:3000");
    }

    #[test]
    fn non_ip_host_is_rejected() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidAddress("not a host:8080".to_string()))
        );
    }

    #[test]
    fn only_development_is_diagnostic() {
        for (environment, diagnostic) in [
            (Environment::Development, true),
            (Environment::Staging, false),
            (Environment::Production, false),
        ] {
            let config = ServerConfig {
                environment,
                ..Default::default()
            };
            assert_eq!(config.is_diagnostic(), diagnostic, "{}", environment);
        }
    }

    #[test]
    fn cors_origins_are_trimmed_and_blanks_dropped() {
        let config = ServerConfig {
            cors_origins: Some(" https://shop.example, ,https://admin.example ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["https://shop.example", "https://admin.example"]
        );
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn request_timeout_must_be_within_bounds() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }

        let config = ServerConfig {
            request_timeout_secs: MAX_REQUEST_TIMEOUT_SECS,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
