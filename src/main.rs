use clap::Parser;
use ebird_notables::utils::{logger, validation::Validate};
use ebird_notables::{CliConfig, LocalStorage, ScrapeEngine, SightingsPipeline, SiteConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ebird-notables");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let api_key = match std::env::var("EBIRD_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            tracing::error!("❌ EBIRD_API_KEY environment variable not set");
            eprintln!("❌ EBIRD_API_KEY environment variable not set");
            std::process::exit(1);
        }
    };

    let site = match SiteConfig::load(&config.config_path) {
        Ok(site) => site,
        Err(e) => {
            tracing::error!("❌ Failed to load {}: {}", config.config_path, e);
            eprintln!("❌ Failed to load {}: {}", config.config_path, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = site.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = SightingsPipeline::new(storage, config, site, api_key);
    let engine = ScrapeEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Site build completed successfully");
            println!("✅ Site build completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Site build failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
