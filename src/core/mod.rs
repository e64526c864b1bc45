pub mod engine;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{RegionFetch, RegionResult, RunOutput};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
