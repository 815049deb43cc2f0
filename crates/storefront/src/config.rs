//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `KIOSK_API_URL` - Base URL of the remote order/catalog authority
//!
//! ## Optional
//! - `KIOSK_API_TOKEN` - Opaque bearer credential from the session
//!   manager (requests go out unauthenticated without it)
//! - `KIOSK_DATA_DIR` - Directory for the persistent store
//!   (default: `.kiosk`)

use std::env;
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default data directory when `KIOSK_DATA_DIR` is unset.
const DEFAULT_DATA_DIR: &str = ".kiosk";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the remote order/catalog authority.
    pub api_url: String,
    /// Opaque bearer credential; treated as an unexamined string.
    pub api_token: Option<SecretString>,
    /// Directory the persistent store writes under.
    pub data_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = require("KIOSK_API_URL")?;
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "KIOSK_API_URL".to_owned(),
                "must start with http:// or https://".to_owned(),
            ));
        }

        let api_token = env::var("KIOSK_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        let data_dir = env::var("KIOSK_DATA_DIR")
            .ok()
            .filter(|d| !d.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        Ok(Self {
            api_url,
            api_token,
            data_dir,
        })
    }

    /// The bearer token, or an empty secret when none was supplied.
    #[must_use]
    pub fn token(&self) -> SecretString {
        self.api_token
            .clone()
            .unwrap_or_else(|| SecretString::from(""))
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_owned()))
}
