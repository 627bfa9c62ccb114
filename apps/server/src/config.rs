//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults suitable for a single-store LAN deployment.

use std::env;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "./dukaan.db".to_string()),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only meaningful when the vars are unset, which is the common
        // test environment
        if env::var("HTTP_PORT").is_err() && env::var("DATABASE_PATH").is_err() {
            let config = ServerConfig::load().unwrap();
            assert_eq!(config.http_port, 8080);
            assert_eq!(config.database_path, "./dukaan.db");
        }
    }
}
