use crate::config::{ApiConfig, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::{validate_country_code, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "country-lookup")]
#[command(about = "Look up a country, its profile and its neighbors")]
pub struct CliConfig {
    #[arg(help = "Country name to look up; omit for interactive mode")]
    pub country: Option<String>,

    #[arg(long, value_name = "CODE", help = "Show details for this neighbor (3-letter code)")]
    pub select: Option<String>,

    #[arg(long, help = "Print the final state as JSON")]
    pub json: bool,

    #[arg(long, value_name = "PATH", help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    #[arg(long, value_name = "SECONDS")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Match the country name exactly")]
    pub full_text: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Reads the config file named by `--config`, if any.
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        self.config
            .as_ref()
            .map(TomlConfig::from_file)
            .transpose()
    }

    /// Merges defaults, the optional file layer and command-line flags, in that order.
    pub fn resolve(&self, file: Option<&TomlConfig>) -> ApiConfig {
        let mut api = file.map(|f| f.api.clone()).unwrap_or_default();

        if let Some(url) = &self.api_base_url {
            api.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            api.timeout_seconds = Some(timeout);
        }
        if self.full_text {
            api.full_text_match = true;
        }
        api
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(code) = &self.select {
            validate_country_code("select", code)?;
        }
        self.resolve(None).validate()
    }
}
