use crate::domain::model::{RegionFetch, RunOutput};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn config_path(&self) -> &str;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RegionFetch>>;
    async fn transform(&self, data: Vec<RegionFetch>) -> Result<RunOutput>;
    async fn load(&self, output: RunOutput) -> Result<String>;
}
