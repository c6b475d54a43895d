//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required variables
//!
//! - `ADMIN_TOKEN` - bearer token authorizing the management API
//! - Either `DATABASE_URL` or all of (`DB_USER`, `DB_PASSWORD`, `DB_NAME`)
//!
//! ## Optional variables
//!
//! - `DB_HOST` / `DB_PORT` - database host components (default: `localhost:5432`)
//! - `LISTEN` - bind address (default: `0.0.0.0:3000`)
//! - `DOMAIN` - public host used when rendering short URLs (default: `localhost:3000`)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - log format: `text` or `json` (default: `text`)
//! - `CLICK_QUEUE_CAPACITY` - click event buffer size (default: 10000)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - pool acquire timeout in seconds (default: 30)

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Public host serving short links, used to build `short_url` fields.
    pub domain: String,
    /// Bearer token of the single allow-listed owner.
    pub admin_token: String,
    pub log_level: String,
    pub log_format: String,
    pub click_queue_capacity: usize,
    pub db_max_connections: u32,
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required database configuration or the admin
    /// token is missing.
    pub fn from_env() -> Result<Self> {
        let database_url =
            Self::load_database_url().context("Failed to load database configuration")?;

        let admin_token = env::var("ADMIN_TOKEN").context("ADMIN_TOKEN must be set")?;
        if admin_token.is_empty() {
            anyhow::bail!("ADMIN_TOKEN must be non-empty");
        }

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let domain = env::var("DOMAIN").unwrap_or_else(|_| "localhost:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let click_queue_capacity = env::var("CLICK_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_connect_timeout = env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            database_url,
            listen_addr,
            domain,
            admin_token,
            log_level,
            log_format,
            click_queue_capacity,
            db_max_connections,
            db_connect_timeout,
        })
    }

    /// Loads database URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. Constructed from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`
    fn load_database_url() -> Result<String> {
        if let Ok(url) = env::var("DATABASE_URL") {
            return Ok(url);
        }

        let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
        let user =
            env::var("DB_USER").context("DB_USER must be set when DATABASE_URL is not provided")?;
        let password = env::var("DB_PASSWORD")
            .context("DB_PASSWORD must be set when DATABASE_URL is not provided")?;
        let name =
            env::var("DB_NAME").context("DB_NAME must be set when DATABASE_URL is not provided")?;

        Ok(format!(
            "postgres://{}:{}@{}:{}/{}",
            user, password, host, port, name
        ))
    }
}
