use anyhow::{Context, Result};

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Groq API key. Optional: when unset, clients must supply a key with
    /// each upload/generate request instead.
    pub groq_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Resolves the API key for one request: a per-request key wins over the
/// configured one. Missing both blocks the operation before any downstream
/// work is attempted.
pub fn resolve_api_key(config: &Config, request_key: Option<&str>) -> Result<String, AppError> {
    request_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .or_else(|| config.groq_api_key.clone())
        .ok_or(AppError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> Config {
        Config {
            groq_api_key: key.map(String::from),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_request_key_wins_over_configured_key() {
        let config = config_with_key(Some("gsk_configured"));
        let key = resolve_api_key(&config, Some("gsk_request")).unwrap();
        assert_eq!(key, "gsk_request");
    }

    #[test]
    fn test_falls_back_to_configured_key() {
        let config = config_with_key(Some("gsk_configured"));
        let key = resolve_api_key(&config, None).unwrap();
        assert_eq!(key, "gsk_configured");
    }

    #[test]
    fn test_blank_request_key_is_ignored() {
        let config = config_with_key(Some("gsk_configured"));
        let key = resolve_api_key(&config, Some("   ")).unwrap();
        assert_eq!(key, "gsk_configured");
    }

    #[test]
    fn test_missing_both_keys_is_an_error() {
        let config = config_with_key(None);
        let result = resolve_api_key(&config, None);
        assert!(matches!(result, Err(AppError::MissingApiKey)));
    }
}
