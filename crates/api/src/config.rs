use std::str::FromStr;

use dissio_core::pagination::DEFAULT_PAGE_SIZE;

use crate::auth::token::TokenConfig;

/// Default ID-token lifetime in minutes.
const DEFAULT_TOKEN_EXPIRY_MINS: i64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the token secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Page size used when a list request has no `limit` (default: `20`).
    pub default_page_size: u32,
    pub log_format: LogFormat,
    /// ID-token signing configuration.
    pub tokens: TokenConfig,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = var_or(name, default);
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `3000`                  |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                    |
    /// | `DEFAULT_PAGE_SIZE`      | `20`                    |
    /// | `LOG_FORMAT`             | `pretty`                |
    /// | `AUTH_TOKEN_SECRET`      | **required**            |
    /// | `AUTH_TOKEN_EXPIRY_MINS` | `60`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = var_or("HOST", "0.0.0.0");
        let port = parse_var("PORT", "3000")?;

        let cors_origins = var_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", "30")?;
        let default_page_size = parse_var("DEFAULT_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())?;

        let log_format = match var_or("LOG_FORMAT", "pretty").as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        let secret = std::env::var("AUTH_TOKEN_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("AUTH_TOKEN_SECRET"))?;
        let expiry_mins = parse_var(
            "AUTH_TOKEN_EXPIRY_MINS",
            &DEFAULT_TOKEN_EXPIRY_MINS.to_string(),
        )?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_page_size,
            log_format,
            tokens: TokenConfig {
                secret,
                expiry_mins,
            },
        })
    }
}
