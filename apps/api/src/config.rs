use anyhow::{Context, Result};

use crate::llm_client::{ApiKey, DEFAULT_BASE_URL};

/// Application configuration loaded from environment variables.
///
/// Nothing is required: without `OPENAI_API_KEY` every review request must
/// carry its own key.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default credential used when a request does not supply one.
    pub openai_api_key: Option<ApiKey>,
    pub openai_base_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .map(ApiKey::new);

        let openai_base_url = lookup("OPENAI_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            openai_api_key,
            openai_base_url,
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
