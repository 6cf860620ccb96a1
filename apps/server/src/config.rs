use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Raw `FT_JWT_SECRET`. A random per-process secret is used when absent.
    pub jwt_secret: Option<String>,
    pub token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("FT_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid FT_LISTEN_ADDR")?;
        let db_path = std::env::var("FT_DB_PATH").unwrap_or_else(|_| "./db/fintrack.db".into());
        let cors_allow = std::env::var("FT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("FT_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = std::env::var("FT_JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let ttl_minutes: u64 = std::env::var("FT_TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "1440".into())
            .parse()
            .unwrap_or(1440);
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_minutes * 60),
        })
    }
}
