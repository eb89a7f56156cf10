use std::env;
use std::net::SocketAddr;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// SQLite URL; the in-memory repository is used when absent.
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        Self::from_parts(&bind_addr, env::var("DATABASE_URL").ok())
    }

    pub fn from_parts(bind_addr: &str, database_url: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            bind_addr: bind_addr.parse().with_context(|| format!("invalid BIND_ADDR {bind_addr:?}"))?,
            database_url: database_url.filter(|url| !url.trim().is_empty()),
        })
    }
}
