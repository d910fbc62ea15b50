//! Configuration management for the `TripWeaver` application
//!
//! Loads all settings from the process environment at startup. The only
//! required value is the Gemini API key; everything else has a default.

use std::env;

use crate::error::PlannerError;

/// Environment variable holding the required Gemini credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Root configuration for the `TripWeaver` application
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Gemini API key (required)
    pub api_key: String,
    /// Gemini model name
    pub model: String,
    /// Base URL for the Gemini API
    pub base_url: String,
    /// Port the web server listens on
    pub port: u16,
    /// Request timeout for completion calls, in seconds
    pub timeout_seconds: u64,
}

// Default value functions
fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timeout() -> u64 {
    30
}

impl PlannerConfig {
    /// Load configuration from the process environment.
    ///
    /// Fails with a configuration error when the API key is absent or when
    /// a numeric override does not parse.
    pub fn from_env() -> Result<Self, PlannerError> {
        let api_key = env::var(API_KEY_VAR)
            .map_err(|_| PlannerError::config(format!("Missing {API_KEY_VAR} env var")))?;

        let model = env::var("TRIPWEAVER_MODEL").unwrap_or_else(|_| default_model());
        let base_url = env::var("TRIPWEAVER_BASE_URL").unwrap_or_else(|_| default_base_url());

        let port = match env::var("TRIPWEAVER_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| PlannerError::config(format!("Invalid TRIPWEAVER_PORT: {raw}")))?,
            Err(_) => default_port(),
        };

        let timeout_seconds = match env::var("TRIPWEAVER_TIMEOUT_SECONDS") {
            Ok(raw) => raw.parse().map_err(|_| {
                PlannerError::config(format!("Invalid TRIPWEAVER_TIMEOUT_SECONDS: {raw}"))
            })?,
            Err(_) => default_timeout(),
        };

        let config = Self {
            api_key,
            model,
            base_url,
            port,
            timeout_seconds,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the assembled configuration
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.api_key.trim().is_empty() {
            return Err(PlannerError::config("API key cannot be empty"));
        }
        if self.model.trim().is_empty() {
            return Err(PlannerError::config("Model name cannot be empty"));
        }
        if self.timeout_seconds == 0 {
            return Err(PlannerError::config("Timeout must be at least 1 second"));
        }
        Ok(())
    }
}
