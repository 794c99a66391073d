//! API credential and endpoint configuration
//!
//! ## Configuration Sources
//! Values are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values.
//!
//! ## Required Keys
//! - `EDAMAM_APP_ID`, `EDAMAM_APP_KEY`: recipe search credentials
//! - `YOUTUBE_API_KEY`: video lookup key
//!
//! ## Optional Keys
//! - `EDAMAM_BASE_URL` (default `https://api.edamam.com`)
//! - `YOUTUBE_BASE_URL` (default `https://www.googleapis.com/youtube/v3`)
//! - `YOUTUBE_LANGUAGE` (default `fr`)

use tracing::info;
use url::Url;

use shared::SharedError;
use crate::error::{FinderError, FinderResult};
use crate::services::{EdamamRecipeClient, YouTubeVideoClient};

/// Runtime configuration for the remote services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    pub edamam_app_id: String,
    pub edamam_app_key: String,
    pub youtube_api_key: String,
    pub edamam_base_url: String,
    pub youtube_base_url: String,
    pub youtube_language: String,
}

impl FinderConfig {
    const REQUIRED_KEYS: &'static [&'static str] = &["EDAMAM_APP_ID", "EDAMAM_APP_KEY", "YOUTUBE_API_KEY"];

    /// Load from `.env` and the process environment
    pub fn from_env() -> FinderResult<Self> {
        // Silently ignore a missing .env file
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> FinderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let missing: Vec<&str> = Self::REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| present(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(FinderError::config(format!(
                "Missing required API keys: {}. These keys must be set as environment variables.",
                missing.join(", ")
            )));
        }

        let edamam_base_url = present("EDAMAM_BASE_URL")
            .unwrap_or_else(|| EdamamRecipeClient::DEFAULT_BASE_URL.to_string());
        let youtube_base_url = present("YOUTUBE_BASE_URL")
            .unwrap_or_else(|| YouTubeVideoClient::DEFAULT_BASE_URL.to_string());
        validate_url("EDAMAM_BASE_URL", &edamam_base_url)?;
        validate_url("YOUTUBE_BASE_URL", &youtube_base_url)?;

        let config = Self {
            edamam_app_id: present("EDAMAM_APP_ID").unwrap_or_default(),
            edamam_app_key: present("EDAMAM_APP_KEY").unwrap_or_default(),
            youtube_api_key: present("YOUTUBE_API_KEY").unwrap_or_default(),
            edamam_base_url,
            youtube_base_url,
            youtube_language: present("YOUTUBE_LANGUAGE")
                .unwrap_or_else(|| YouTubeVideoClient::DEFAULT_LANGUAGE.to_string()),
        };

        info!(
            recipes = %config.edamam_base_url,
            videos = %config.youtube_base_url,
            language = %config.youtube_language,
            "API configuration loaded"
        );
        Ok(config)
    }

    pub fn recipe_client(&self) -> EdamamRecipeClient {
        EdamamRecipeClient::new(&self.edamam_base_url, &self.edamam_app_id, &self.edamam_app_key)
    }

    pub fn video_client(&self) -> YouTubeVideoClient {
        YouTubeVideoClient::new(&self.youtube_base_url, &self.youtube_api_key, &self.youtube_language)
    }
}

fn validate_url(field: &str, value: &str) -> FinderResult<()> {
    let parsed = Url::parse(value).map_err(|_| SharedError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SharedError::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}
