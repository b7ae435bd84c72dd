use std::str::FromStr;

use anyhow::{bail, Context, Result};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if the Gemini credential is missing or blank.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on resumes accepted in a single evaluation run.
    pub max_resumes_per_run: usize,
    /// Request body cap for multipart uploads, in bytes.
    pub max_upload_bytes: usize,
    /// Finished reports kept in memory until downloaded.
    pub report_cache_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let google_api_key = require_env("GOOGLE_API_KEY")?;
        if google_api_key.trim().is_empty() {
            bail!("Required environment variable 'GOOGLE_API_KEY' is blank");
        }

        Ok(Config {
            google_api_key,
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_resumes_per_run: env_or("MAX_RESUMES_PER_RUN", 20)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 25 * 1024 * 1024)?,
            report_cache_capacity: env_or("REPORT_CACHE_CAPACITY", 64)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by handler and pipeline tests; never reads the environment.
    pub fn for_tests() -> Self {
        Config {
            google_api_key: "test-key".to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            max_resumes_per_run: 5,
            max_upload_bytes: 1024 * 1024,
            report_cache_capacity: 4,
        }
    }
}
