use crate::domain::model::RawObservation;
use crate::utils::error::{Result, SightingsError};
use reqwest::Client;

/// Thin wrapper over the eBird 2.0 data API.
///
/// API docs: https://documenter.getpostman.com/view/664302/S1ENwy59
pub struct EbirdClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EbirdClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// `GET /data/obs/{regionCode}/recent/notable` with full detail.
    ///
    /// A non-2xx status maps to [`SightingsError::ApiStatus`], which the
    /// pipeline treats as a per-region failure. Transport errors and
    /// unexpected response bodies propagate as fatal.
    pub async fn recent_notable(
        &self,
        region_code: &str,
        days_back: u32,
        max_results: u32,
    ) -> Result<Vec<RawObservation>> {
        let url = format!("{}/data/obs/{}/recent/notable", self.base_url, region_code);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-eBirdApiToken", &self.api_key)
            .query(&[
                ("back", days_back.to_string()),
                ("maxResults", max_results.to_string()),
                ("detail", "full".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(SightingsError::ApiStatus {
                region: region_code.to_string(),
                status,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_recent_notable_sends_key_and_params() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/data/obs/US-MA/recent/notable")
                .header("X-eBirdApiToken", "test-key")
                .query_param("back", "7")
                .query_param("maxResults", "100")
                .query_param("detail", "full");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"comName": "Snowy Owl", "howMany": 1, "subId": "S1"}
                ]));
        });

        let client = EbirdClient::new("test-key", server.base_url());
        let observations = client.recent_notable("US-MA", 7, 100).await.unwrap();

        api_mock.assert();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].com_name.as_deref(), Some("Snowy Owl"));
    }

    #[tokio::test]
    async fn test_recent_notable_non_2xx_is_recoverable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/data/obs/US-XX/recent/notable");
            then.status(404);
        });

        let client = EbirdClient::new("test-key", server.base_url());
        let err = client.recent_notable("US-XX", 7, 100).await.unwrap_err();

        assert!(err.is_recoverable());
        assert!(err.to_string().contains("US-XX"));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_recent_notable_bad_body_is_fatal() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/data/obs/US-MA/recent/notable");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("not json at all");
        });

        let client = EbirdClient::new("test-key", server.base_url());
        let err = client.recent_notable("US-MA", 7, 100).await.unwrap_err();

        assert!(!err.is_recoverable());
    }
}
