use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/prospector";
const DEFAULT_SCRAPE_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Only the Gemini API key is required; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub database_url: String,
    pub scrape_timeout_secs: u64,
    pub scrape_max_chars: usize,
    pub scrape_max_bytes: usize,
    pub scrape_allow_private_hosts: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context(
                "GEMINI_API_KEY not found. Create a .env file in the working directory \
                 with your Gemini API key: GEMINI_API_KEY=your_api_key_here",
            )?;

        Ok(Config {
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            scrape_timeout_secs: lookup("SCRAPE_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse::<u64>()
                .context("SCRAPE_TIMEOUT_SECS must be a whole number of seconds")?,
            scrape_max_chars: lookup("SCRAPE_MAX_CHARS")
                .unwrap_or_else(|| "60000".to_string())
                .parse::<usize>()
                .context("SCRAPE_MAX_CHARS must be a positive integer")?,
            scrape_max_bytes: lookup("SCRAPE_MAX_BYTES")
                .unwrap_or_else(|| DEFAULT_SCRAPE_MAX_BYTES.to_string())
                .parse::<usize>()
                .context("SCRAPE_MAX_BYTES must be a positive integer")?,
            scrape_allow_private_hosts: lookup("SCRAPE_ALLOW_PRIVATE_HOSTS")
                .unwrap_or_else(|| "false".to_string())
                .parse::<bool>()
                .context("SCRAPE_ALLOW_PRIVATE_HOSTS must be true or false")?,
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
