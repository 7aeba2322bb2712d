//! Configuration management for FleetDeck

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote backend configuration
    pub backend: BackendConfig,

    /// Web server configuration
    #[serde(default)]
    pub webserver: WebServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the REST backend, without a trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Static bearer token fallback for development setups without a
    /// session provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8090
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from environment and files
    ///
    /// Reads an optional `fleetdeck.toml` in the working directory, then
    /// overlays `FLEETDECK_`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("fleetdeck").required(false))
            .add_source(config::Environment::with_prefix("FLEETDECK").separator("_"))
            .build()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        config
            .try_deserialize()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        let base_url = std::env::var("FLEETDECK_BACKEND_BASE_URL")
            .or_else(|_| std::env::var("BACKEND_BASE_URL"))
            .unwrap_or_else(|_| "http://localhost:4000".to_string());

        Self {
            backend: BackendConfig {
                base_url,
                timeout_secs: default_timeout_secs(),
                api_token: None,
            },
            webserver: WebServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.webserver.port, 8090);
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert!(config.backend.api_token.is_none());
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let toml = r#"
            [backend]
            base_url = "https://api.example.com"
        "#;

        let config: Config = toml_from_str(toml);

        assert_eq!(config.backend.base_url, "https://api.example.com");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.webserver.host, "0.0.0.0");
        assert_eq!(config.logging.format, "json");
    }

    fn toml_from_str(raw: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .and_then(config::Config::try_deserialize)
            .unwrap_or_else(|e| panic!("config should parse: {e}"))
    }
}
