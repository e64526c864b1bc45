pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::ebird::EbirdClient;
pub use config::{cli::LocalStorage, site::SiteConfig, CliConfig};
pub use core::{engine::ScrapeEngine, pipeline::SightingsPipeline, render};
pub use domain::model::{
    Count, FormattedObservation, RawObservation, Region, RegionResult, RunOutput,
};
pub use utils::error::{Result, SightingsError};
