//! Runtime configuration read from the environment (and `.env`, if present).

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE_URL: &str = "memory";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR {value:?}: {source}")]
    BindAddr { value: String, source: std::net::AddrParseError },
    #[error("unsupported DATABASE_URL {0:?}; expected `memory` or a `sqlite:` url")]
    DatabaseUrl(String),
}

/// Which backing store to build at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; missing keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse::<SocketAddr>().map_err(|source| ConfigError::BindAddr { value: bind.clone(), source })?;
        let url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        Ok(Self { bind_addr, store: parse_store(&url)? })
    }
}

fn parse_store(url: &str) -> Result<StoreConfig, ConfigError> {
    match url.trim() {
        "" | "memory" => Ok(StoreConfig::Memory),
        u if u.starts_with("sqlite:") => Ok(StoreConfig::Sqlite(u.to_string())),
        other => Err(ConfigError::DatabaseUrl(other.to_string())),
    }
}
