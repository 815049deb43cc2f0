//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `KIOSK_API_URL` - Base URL of the remote order authority
//!
//! ## Optional
//! - `KIOSK_API_TOKEN` - Opaque bearer credential from the session
//!   manager

use std::env;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Admin engine configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the remote order authority.
    pub api_url: String,
    /// Opaque bearer credential; treated as an unexamined string.
    pub api_token: Option<SecretString>,
}

impl AdminConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `KIOSK_API_URL` is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var("KIOSK_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("KIOSK_API_URL".to_owned()))?;

        let api_token = env::var("KIOSK_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        Ok(Self { api_url, api_token })
    }

    /// The bearer token, or an empty secret when none was supplied.
    #[must_use]
    pub fn token(&self) -> SecretString {
        self.api_token
            .clone()
            .unwrap_or_else(|| SecretString::from(""))
    }
}
