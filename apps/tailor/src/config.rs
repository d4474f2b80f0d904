use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_OUTPUT: &str = "updated_resume.tex";
pub const DEFAULT_BULLET_TARGET: usize = 6;

/// Application configuration loaded from environment variables (and `.env`).
/// CLI flags override these values in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Only required once a generation call is about to be made.
    pub anthropic_api_key: Option<String>,
    pub rust_log: String,
    pub output: PathBuf,
    pub bullet_target: usize,
    pub llm_timeout: Duration,
    /// Includes the first call: 2 means one retry.
    pub llm_max_attempts: u32,
    pub scrape_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let bullet_target: usize = parse_env("TAILOR_BULLET_TARGET", DEFAULT_BULLET_TARGET)?;
        if bullet_target == 0 {
            anyhow::bail!("TAILOR_BULLET_TARGET must be at least 1");
        }

        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            output: std::env::var("TAILOR_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT)),
            bullet_target,
            llm_timeout: Duration::from_secs(parse_env("TAILOR_LLM_TIMEOUT_SECS", 120)?),
            llm_max_attempts: parse_env("TAILOR_LLM_MAX_ATTEMPTS", 2)?,
            scrape_timeout: Duration::from_secs(parse_env("TAILOR_SCRAPE_TIMEOUT_SECS", 10)?),
        })
    }

    /// The API key, or an error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.anthropic_api_key
            .as_deref()
            .context("Required environment variable 'ANTHROPIC_API_KEY' is not set")
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
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
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("TAILOR_TEST_SURELY_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("TAILOR_TEST_GARBAGE_NUMBER", "six");
        let result: Result<usize> = parse_env("TAILOR_TEST_GARBAGE_NUMBER", 6);
        assert!(result.is_err());
        std::env::remove_var("TAILOR_TEST_GARBAGE_NUMBER");
    }

    #[test]
    fn test_require_api_key_reports_missing_variable() {
        let config = Config {
            anthropic_api_key: None,
            rust_log: "info".to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            bullet_target: DEFAULT_BULLET_TARGET,
            llm_timeout: Duration::from_secs(1),
            llm_max_attempts: 2,
            scrape_timeout: Duration::from_secs(1),
        };
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }
}
