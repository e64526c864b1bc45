pub mod cli;
pub mod site;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ebird-notables")]
#[command(about = "Fetch notable eBird sightings and build a static JSON + HTML site")]
pub struct CliConfig {
    /// Path to the regions configuration file
    #[arg(long, default_value = "config.json")]
    pub config_path: String,

    /// Directory the generated site is written to
    #[arg(long, default_value = "docs")]
    pub output_path: String,

    /// Base URL of the eBird API
    #[arg(long, default_value = "https://api.ebird.org/v2")]
    pub api_base: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn config_path(&self) -> &str {
        &self.config_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_path("config_path", &self.config_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
