use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Server
    pub port: u16,

    // Admin endpoints are closed when no key is configured
    pub admin_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            // Database
            database_url: lookup("DATABASE_URL").context("DATABASE_URL not set")?,
            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),

            // Server
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(8080),

            // Admin
            admin_api_key: lookup("ADMIN_API_KEY")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}
