//! Configuration module for the UniNoter backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

/// Which document store backs the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// SQLite file, the default
    Sqlite,
    /// Process-local store, lost on restart
    Memory,
}

impl StoreKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Some(StoreKind::Sqlite),
            "memory" => Some(StoreKind::Memory),
            _ => None,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Document store backend
    pub store: StoreKind,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let store_raw = env::var("UNINOTER_STORE").unwrap_or_else(|_| "sqlite".to_string());
        let store = StoreKind::parse(&store_raw).ok_or_else(|| {
            AppError::Internal(format!(
                "Invalid UNINOTER_STORE '{}': expected 'sqlite' or 'memory'",
                store_raw
            ))
        })?;

        let db_path = env::var("UNINOTER_DB_PATH")
            .unwrap_or_else(|_| "./data/uninoter.sqlite".to_string())
            .into();

        let bind_raw =
            env::var("UNINOTER_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
        let bind_addr = bind_raw.parse().map_err(|_| {
            AppError::Internal(format!("Invalid UNINOTER_BIND_ADDR format: {}", bind_raw))
        })?;

        let log_level = env::var("UNINOTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            store,
            db_path,
            bind_addr,
            log_level,
        })
    }
}
