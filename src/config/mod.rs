//! Service configuration
//!
//! Configuration structs with per-field defaults, loaded from environment
//! variables (a `.env` file is honored in development). Everything consumed
//! by the subsystems is passed in explicitly at construction; nothing here
//! is ambient global state.

use crate::utils::error::{ChirpError, Result};
use serde::{Deserialize, Serialize};

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Deployment platform ("dev" unlocks destructive admin endpoints)
    #[serde(default = "default_platform")]
    pub platform: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL
    pub url: String,
    /// Maximum pool connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric signing secret for access tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl: u64,
    /// Refresh token lifetime in days
    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
    /// Static API key authorizing the billing webhook caller
    pub polka_key: String,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Honors a `.env` file when present. `DATABASE_URL`, `JWT_SECRET`, and
    /// `POLKA_KEY` are required; everything else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            server: ServerConfig {
                host: env_or("HOST", default_host()),
                port: env_parsed("PORT", default_port())?,
            },
            database: DatabaseConfig {
                url: required_env("DATABASE_URL")?,
                max_connections: env_parsed("DATABASE_MAX_CONNECTIONS", default_max_connections())?,
                connection_timeout: env_parsed(
                    "DATABASE_CONNECT_TIMEOUT_SECS",
                    default_connection_timeout(),
                )?,
            },
            auth: AuthConfig {
                jwt_secret: required_env("JWT_SECRET")?,
                access_token_ttl: env_parsed("ACCESS_TOKEN_TTL_SECS", default_access_token_ttl())?,
                refresh_token_ttl_days: env_parsed(
                    "REFRESH_TOKEN_TTL_DAYS",
                    default_refresh_token_ttl_days(),
                )?,
                polka_key: required_env("POLKA_KEY")?,
            },
            platform: env_or("PLATFORM", default_platform()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ChirpError::config("DATABASE_URL must not be empty"));
        }

        self.auth.validate()
    }

    /// Whether the service runs on the development platform
    pub fn is_dev_platform(&self) -> bool {
        self.platform == "dev"
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 32 {
            return Err(ChirpError::config(
                "JWT secret must be at least 32 characters long",
            ));
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(ChirpError::config(
                "JWT secret must not use a placeholder value",
            ));
        }

        if self.access_token_ttl == 0 {
            return Err(ChirpError::config("access token TTL must be positive"));
        }

        if self.refresh_token_ttl_days <= 0 {
            return Err(ChirpError::config("refresh token TTL must be positive"));
        }

        if self.polka_key.is_empty() {
            return Err(ChirpError::config("POLKA_KEY must not be empty"));
        }

        Ok(())
    }

    /// Fixed test configuration used across unit tests
    #[cfg(test)]
    pub(crate) fn test_defaults() -> Self {
        Self {
            jwt_secret: "unit-test-secret-key-0123456789abcdef".to_string(),
            access_token_ttl: default_access_token_ttl(),
            refresh_token_ttl_days: default_refresh_token_ttl_days(),
            polka_key: "f271c81ff7084ee5b99a5091b42d486e".to_string(),
        }
    }
}

fn env_or(key: &str, fallback: String) -> String {
    std::env::var(key).unwrap_or(fallback)
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| ChirpError::config(format!("{} must be set", key)))
}

fn env_parsed<T: std::str::FromStr>(key: &str, fallback: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ChirpError::config(format!("{} is not a valid value", key))),
        Err(_) => Ok(fallback),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_access_token_ttl() -> u64 {
    3600
}

fn default_refresh_token_ttl_days() -> i64 {
    60
}

fn default_platform() -> String {
    "production".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/chirpd".to_string(),
                max_connections: default_max_connections(),
                connection_timeout: default_connection_timeout(),
            },
            auth: AuthConfig::test_defaults(),
            platform: "dev".to_string(),
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_short_jwt_secret_is_rejected() {
        let mut config = valid_config();
        config.auth.jwt_secret = "too-short".to_string();
        assert!(matches!(config.validate(), Err(ChirpError::Config(_))));
    }

    #[test]
    fn test_placeholder_jwt_secret_is_rejected() {
        let mut config = valid_config();
        config.auth.jwt_secret = "your-secret-key".to_string();
        assert!(matches!(config.validate(), Err(ChirpError::Config(_))));
    }

    #[test]
    fn test_empty_polka_key_is_rejected() {
        let mut config = valid_config();
        config.auth.polka_key = String::new();
        assert!(matches!(config.validate(), Err(ChirpError::Config(_))));
    }

    #[test]
    fn test_dev_platform_detection() {
        let mut config = valid_config();
        assert!(config.is_dev_platform());
        config.platform = "production".to_string();
        assert!(!config.is_dev_platform());
    }
}
