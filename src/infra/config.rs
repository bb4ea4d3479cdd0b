//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_FILTER: &str = "product_catalog=debug,tower_http=debug";

/// Database URL must be provided (no default).
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").map_err(|_| anyhow!("DATABASE_URL must be set"))
}

/// Upper bound on pooled connections.
pub fn max_connections() -> anyhow::Result<u32> {
    match std::env::var("DATABASE_MAX_CONNECTIONS") {
        Ok(v) => {
            let n = v
                .parse::<u32>()
                .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;
            Ok(n.max(1))
        }
        Err(_) => Ok(DEFAULT_MAX_CONNECTIONS),
    }
}

/// Address the API server listens on.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Everything the server binary needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: database_url()?,
            max_connections: max_connections()?,
            bind_addr: bind_addr(),
        })
    }
}
