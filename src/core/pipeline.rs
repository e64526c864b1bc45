use crate::adapters::ebird::EbirdClient;
use crate::config::site::SiteConfig;
use crate::core::render;
use crate::domain::model::{RegionFetch, RegionResult, RunOutput};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;
use chrono::Utc;

pub struct SightingsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    site: SiteConfig,
    client: EbirdClient,
}

impl<S: Storage, C: ConfigProvider> SightingsPipeline<S, C> {
    pub fn new(storage: S, config: C, site: SiteConfig, api_key: String) -> Self {
        let client = EbirdClient::new(api_key, config.api_base());
        Self {
            storage,
            config,
            site,
            client,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SightingsPipeline<S, C> {
    /// One sequential fetch per configured region. A non-2xx response is
    /// captured on that region's entry and the loop continues; any other
    /// failure aborts the run.
    async fn extract(&self) -> Result<Vec<RegionFetch>> {
        let mut fetches = Vec::with_capacity(self.site.regions.len());

        for region in &self.site.regions {
            println!(
                "Fetching notable observations for {} ({})...",
                region.name, region.code
            );

            match self
                .client
                .recent_notable(&region.code, self.site.days_back, self.site.max_results)
                .await
            {
                Ok(observations) => {
                    println!("  Found {} notable sightings", observations.len());
                    fetches.push(RegionFetch {
                        region: region.clone(),
                        observations,
                        error: None,
                    });
                }
                Err(e) if e.is_recoverable() => {
                    println!("  Error fetching {}: {}", region.code, e);
                    tracing::warn!("Fetch failed for {}: {}", region.code, e);
                    fetches.push(RegionFetch {
                        region: region.clone(),
                        observations: Vec::new(),
                        error: Some(e.to_string()),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(fetches)
    }

    async fn transform(&self, data: Vec<RegionFetch>) -> Result<RunOutput> {
        let regions: Vec<RegionResult> = data.into_iter().map(RegionResult::from).collect();

        Ok(RunOutput {
            last_updated: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
            config: self.site.clone(),
            regions,
        })
    }

    async fn load(&self, output: RunOutput) -> Result<String> {
        let json = serde_json::to_string_pretty(&output)?;
        self.storage.write_file("data.json", json.as_bytes()).await?;
        println!("Saved data to {}/data.json", self.config.output_path());

        let html = render::render_page(&output.regions, &output.last_updated);
        self.storage.write_file("index.html", html.as_bytes()).await?;
        println!("Saved HTML to {}/index.html", self.config.output_path());

        Ok(self.config.output_path().to_string())
    }
}
