//! Runtime configuration resolved from the process environment.

use crate::{Error, Result};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Marker left in sample configuration files in place of a real key.
const PLACEHOLDER_MARKER: &str = "PASTE_YOUR";

const MISSING_KEY_MESSAGE: &str = "Gemini API Key is missing.";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from `.env` and the environment.
    ///
    /// A missing `GEMINI_API_KEY` is not an error here: the key is checked on
    /// every request so the server can start and answer with a configuration
    /// error instead of refusing to boot.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let timeout_secs = match std::env::var("GEMINI_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                Error::Configuration(format!("GEMINI_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: std::env::var("GEMINI_API_KEY").ok(),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Returns the usable API key, or a configuration error when the key is
    /// absent, blank, or still a placeholder.
    pub fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && !key.contains(PLACEHOLDER_MARKER) => Ok(key),
            _ => Err(Error::Configuration(MISSING_KEY_MESSAGE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_present() {
        let config = Config::new(Some("real-key".to_string()));
        assert_eq!(config.api_key().unwrap(), "real-key");
    }

    #[test]
    fn test_api_key_missing() {
        let err = Config::new(None).api_key().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(err.to_string(), "Gemini API Key is missing.");
    }

    #[test]
    fn test_api_key_blank_is_rejected() {
        let err = Config::new(Some("   ".to_string())).api_key().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_api_key_placeholder_is_rejected() {
        let config = Config::new(Some("PASTE_YOUR_GEMINI_KEY_HERE".to_string()));
        assert!(matches!(
            config.api_key().unwrap_err(),
            Error::Configuration(_)
        ));
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new(None)
            .with_model("gemini-2.0-flash")
            .with_base_url("http://localhost:9999")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
