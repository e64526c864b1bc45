use thiserror::Error;

#[derive(Error, Debug)]
pub enum SightingsError {
    #[error("eBird API returned {status} for region {region}")]
    ApiStatus {
        region: String,
        status: reqwest::StatusCode,
    },

    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl SightingsError {
    /// A non-2xx response for one region is recorded on that region's result
    /// and the run continues. Everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SightingsError::ApiStatus { .. })
    }
}

pub type Result<T> = std::result::Result<T, SightingsError>;
