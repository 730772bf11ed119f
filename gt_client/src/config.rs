//! Client configuration.
//!
//! Consolidates all environment variable reads and provides validated
//! configuration for the client binary.

use std::time::Duration;
use url::Url;

/// Complete client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the account API, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Public IP reported on login, when known.
    pub public_ip: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Arguments
    ///
    /// * `base_url_override` - Optional base URL override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration fails validation.
    pub fn from_env(base_url_override: Option<String>) -> Result<Self, ConfigError> {
        let base_url = base_url_override
            .or_else(|| std::env::var("GAMETRACKER_BASE_URL").ok())
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let config = ClientConfig {
            base_url,
            public_ip: std::env::var("GAMETRACKER_PUBLIC_IP").ok(),
            request_timeout_secs: parse_env_or("GAMETRACKER_TIMEOUT_SECS", 30),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::Invalid {
            var: "GAMETRACKER_BASE_URL".to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                var: "GAMETRACKER_BASE_URL".to_string(),
                reason: format!("Unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "GAMETRACKER_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Build the HTTP client this configuration describes.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()
            .map_err(|e| ConfigError::Invalid {
                var: "GAMETRACKER_TIMEOUT_SECS".to_string(),
                reason: e.to_string(),
            })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse an environment variable with a default fallback.
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ClientConfig {
            base_url: "https://gametracker.example.com".to_string(),
            public_ip: None,
            request_timeout_secs: 30,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            public_ip: None,
            request_timeout_secs: 30,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = ClientConfig {
            base_url: "ftp://example.com".to_string(),
            public_ip: None,
            request_timeout_secs: 30,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = ClientConfig {
            base_url: "http://localhost:3000".to_string(),
            public_ip: None,
            request_timeout_secs: 0,
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GAMETRACKER_TIMEOUT_SECS"));
    }
}
