use crate::domain::model::Region;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_days_back() -> u32 {
    7
}

fn default_max_results() -> u32 {
    100
}

/// Which regions to fetch and how far back to look. Loaded once from a JSON
/// file at startup and embedded verbatim in the run output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub regions: Vec<Region>,

    #[serde(default = "default_days_back")]
    pub days_back: u32,

    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl SiteConfig {
    /// A missing or malformed file is fatal; there is no default-only fallback.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        for region in &self.regions {
            validation::validate_non_empty_string("regions.code", &region.code)?;
            validation::validate_non_empty_string("regions.name", &region.name)?;
        }
        validation::validate_positive_number("days_back", self.days_back, 1)?;
        validation::validate_positive_number("max_results", self.max_results, 1)?;
        Ok(())
    }
}
