use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting eBird notable sightings build...");

        // Extract
        let fetches = self.pipeline.extract().await?;
        println!("Fetched {} regions", fetches.len());

        // Transform
        let output = self.pipeline.transform(fetches).await?;
        let total: usize = output.regions.iter().map(|r| r.observations.len()).sum();
        println!("Formatted {} observations", total);

        // Load
        let output_path = self.pipeline.load(output).await?;
        println!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
