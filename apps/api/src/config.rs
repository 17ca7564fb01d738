use std::str::FromStr;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub session_ttl: chrono::Duration,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: u64 = parse_or(&lookup, "BACKEND_TIMEOUT_SECS", 120)?;
        let ttl_minutes: u64 = parse_or(&lookup, "SESSION_TTL_MINUTES", 120)?;
        let upload_mb: usize = parse_or(&lookup, "MAX_UPLOAD_MB", 25)?;

        ensure!(ttl_minutes > 0, "SESSION_TTL_MINUTES must be at least 1");
        let session_ttl = i64::try_from(ttl_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .with_context(|| format!("SESSION_TTL_MINUTES is out of range, got {ttl_minutes}"))?;
        let max_upload_bytes = upload_mb
            .checked_mul(1024 * 1024)
            .with_context(|| format!("MAX_UPLOAD_MB is out of range, got {upload_mb}"))?;

        Ok(Config {
            backend_url: lookup("ANALYSIS_API_URL")
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            backend_timeout: Duration::from_secs(timeout_secs),
            session_ttl,
            max_upload_bytes,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
