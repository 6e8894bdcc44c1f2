use std::str::FromStr;

use anyhow::{bail, Context, Result};

pub const DEFAULT_DATASET_PATH: &str = "IT_Job_Roles_Skills_Dataset.csv";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but unparseable.
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: String,
    /// Serve the built-in sample table instead of reading `dataset_path`.
    /// Only honoured when `DATASET_PATH` is not set explicitly.
    pub use_sample_dataset: bool,
    /// Absent key means AI suggestions and descriptions are disabled.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub ai_timeout_secs: u64,
    /// Jaro-Winkler similarity at or above which two skills count as the same.
    pub fuzzy_threshold: f64,
    pub max_dataset_jobs: usize,
    pub max_ai_jobs: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
            use_sample_dataset: false,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            ai_timeout_secs: 10,
            fuzzy_threshold: 0.9,
            max_dataset_jobs: 5,
            max_ai_jobs: 5,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let explicit_dataset = std::env::var("DATASET_PATH").ok();

        Ok(Config {
            use_sample_dataset: explicit_dataset.is_none()
                && parse_env("USE_SAMPLE_DATASET", false)?,
            dataset_path: explicit_dataset.unwrap_or(defaults.dataset_path),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or(defaults.gemini_base_url),
            ai_timeout_secs: parse_env("AI_TIMEOUT_SECS", defaults.ai_timeout_secs)?,
            fuzzy_threshold: validate_fuzzy_threshold(parse_env(
                "FUZZY_THRESHOLD",
                defaults.fuzzy_threshold,
            )?)?,
            max_dataset_jobs: parse_env("MAX_DATASET_JOBS", defaults.max_dataset_jobs)?,
            max_ai_jobs: parse_env("MAX_AI_JOBS", defaults.max_ai_jobs)?,
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

/// Similarity scores live in `[0, 1]`, so anything outside it (NaN included) is rejected.
fn validate_fuzzy_threshold(value: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&value) {
        bail!("Environment variable 'FUZZY_THRESHOLD' must be between 0 and 1, got {value}");
    }
    Ok(value)
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
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_disable_ai() {
        let config = Config::default();
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.max_dataset_jobs, 5);
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("CAREER_COACH_TEST_UNSET_VARIABLE", 4242).unwrap();
        assert_eq!(value, 4242);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("CAREER_COACH_TEST_BAD_PORT", "not-a-port");
        let result: Result<u16> = parse_env("CAREER_COACH_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        std::env::remove_var("CAREER_COACH_TEST_BAD_PORT");
    }

    #[test]
    fn test_fuzzy_threshold_rejects_non_finite_and_out_of_range() {
        std::env::set_var("CAREER_COACH_TEST_NAN_THRESHOLD", "NaN");
        let parsed: f64 = parse_env("CAREER_COACH_TEST_NAN_THRESHOLD", 0.9).unwrap();
        std::env::remove_var("CAREER_COACH_TEST_NAN_THRESHOLD");

        assert!(validate_fuzzy_threshold(parsed).is_err());
        assert!(validate_fuzzy_threshold(f64::INFINITY).is_err());
        assert!(validate_fuzzy_threshold(1.5).is_err());
        assert!(validate_fuzzy_threshold(-0.1).is_err());
        assert_eq!(validate_fuzzy_threshold(0.85).unwrap(), 0.85);
        assert_eq!(validate_fuzzy_threshold(1.0).unwrap(), 1.0);
    }
}
