use std::env;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("INVOICE_PORT must be a port number between 1 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("INVOICE_HOST must not be empty")]
    EmptyHost,
}

/// Bind address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read `INVOICE_HOST` and `INVOICE_PORT`, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_values(
            env::var("INVOICE_HOST").ok().as_deref(),
            env::var("INVOICE_PORT").ok().as_deref(),
        )
    }

    pub fn from_values(host: Option<&str>, port: Option<&str>) -> Result<Self, ConfigError> {
        let host = match host.map(str::trim) {
            None => DEFAULT_HOST.to_string(),
            Some("") => return Err(ConfigError::EmptyHost),
            Some(h) => h.to_string(),
        };

        let port = match port.map(str::trim) {
            None | Some("") => DEFAULT_PORT,
            Some(p) => match p.parse::<u16>() {
                Ok(0) | Err(_) => return Err(ConfigError::InvalidPort(p.to_string())),
                Ok(port) => port,
            },
        };

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
