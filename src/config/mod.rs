#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://restcountries.com/v3.1";
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Settings the REST client runs with, after all configuration layers are merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub full_text_match: bool,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: None,
            full_text_match: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.base_url)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("api.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }
        Ok(())
    }
}

impl ConfigProvider for ApiConfig {
    fn api_base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn full_text_match(&self) -> bool {
        self.full_text_match
    }
}
