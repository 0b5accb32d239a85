use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::scoring::ScoreWeights;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON file extending the built-in dictionaries.
    pub dictionary_path: Option<PathBuf>,
    pub session_capacity: usize,
    /// Used when a match request carries no weights of its own.
    pub default_weights: ScoreWeights,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoreWeights::default();

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            dictionary_path: std::env::var("SKILLMATCH_DICTIONARY_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            session_capacity: parse_env("SKILLMATCH_SESSION_CAPACITY", 256)?,
            default_weights: ScoreWeights {
                skills: parse_env("SKILLMATCH_WEIGHT_SKILLS", defaults.skills)?,
                experience: parse_env("SKILLMATCH_WEIGHT_EXPERIENCE", defaults.experience)?,
                education: parse_env("SKILLMATCH_WEIGHT_EDUCATION", defaults.education)?,
                certifications: parse_env(
                    "SKILLMATCH_WEIGHT_CERTIFICATIONS",
                    defaults.certifications,
                )?,
            },
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
}
