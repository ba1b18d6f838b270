pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::RestCountriesClient;
pub use config::{ApiConfig, TomlConfig};
pub use crate::core::{
    state::{LookupState, Phase},
    workflow::CountryLookupWorkflow,
};
pub use domain::{model::CountryProfile, ports::CountryApi};
pub use utils::error::{LookupError, Result};
