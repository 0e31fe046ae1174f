use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::ranking::scorer::DEFAULT_SKILLS_WEIGHT;

/// Application configuration loaded from environment variables.
/// Every value has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub upload_dir: PathBuf,
    pub export_path: PathBuf,
    pub skills_weight: f64,
    /// Structured resume parser endpoint. Unset disables that strategy.
    pub resume_parser_url: Option<String>,
    /// NER service base URL. Unset disables that strategy.
    pub ner_service_url: Option<String>,
    pub service_timeout: Duration,
    pub resume_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let skills_weight = parse_env("SKILLS_WEIGHT", DEFAULT_SKILLS_WEIGHT)
            .context("SKILLS_WEIGHT must be a number")?;
        if !(0.0..=1.0).contains(&skills_weight) {
            bail!("SKILLS_WEIGHT must be between 0 and 1, got {skills_weight}");
        }

        let max_upload_mb: usize =
            parse_env("MAX_UPLOAD_MB", 25).context("MAX_UPLOAD_MB must be a whole number")?;

        Ok(Config {
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            export_path: std::env::var("EXPORT_PATH")
                .unwrap_or_else(|_| "ranked_resumes.csv".to_string())
                .into(),
            skills_weight,
            resume_parser_url: optional_env("RESUME_PARSER_URL"),
            ner_service_url: optional_env("NER_SERVICE_URL"),
            service_timeout: Duration::from_secs(
                parse_env("SERVICE_TIMEOUT_SECS", 30)
                    .context("SERVICE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            resume_timeout: Duration::from_secs(
                parse_env("RESUME_TIMEOUT_SECS", 60)
                    .context("RESUME_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}

/// Reads `key`, falling back to `default` when unset. A set-but-unparseable value is an error.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for '{key}': {raw}")),
        Err(_) => Ok(default),
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
