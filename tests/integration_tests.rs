use ebird_notables::domain::ports::ConfigProvider;
use ebird_notables::{
    CliConfig, Count, LocalStorage, Region, RunOutput, ScrapeEngine, SightingsPipeline, SiteConfig,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn site_config() -> SiteConfig {
    SiteConfig {
        regions: vec![
            Region {
                code: "US-MA".to_string(),
                name: "Massachusetts".to_string(),
            },
            Region {
                code: "US-VT".to_string(),
                name: "Vermont".to_string(),
            },
        ],
        days_back: 7,
        max_results: 100,
    }
}

fn cli_config(server: &MockServer, output_path: &str) -> CliConfig {
    CliConfig {
        config_path: "config.json".to_string(),
        output_path: output_path.to_string(),
        api_base: server.base_url(),
        verbose: false,
    }
}

#[tokio::test]
async fn test_end_to_end_site_build() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let ma_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/data/obs/US-MA/recent/notable")
            .header("X-eBirdApiToken", "test-key")
            .query_param("back", "7")
            .query_param("maxResults", "100")
            .query_param("detail", "full");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {
                    "comName": "Snowy Owl",
                    "sciName": "Bubo scandiacus",
                    "howMany": 2,
                    "locName": "Salisbury Beach",
                    "obsDt": "2024-01-15 08:30",
                    "lat": 42.85,
                    "lng": -70.81,
                    "subId": "S123456789",
                    "speciesCode": "snoowl1",
                    "locId": "L1234",
                    "userDisplayName": "Jane Birder",
                    "obsValid": true,
                    "obsReviewed": true
                },
                {
                    "comName": "Gyrfalcon"
                }
            ]));
    });
    let vt_mock = server.mock(|when, then| {
        when.method(GET).path("/data/obs/US-VT/recent/notable");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let config = cli_config(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = SightingsPipeline::new(storage, config, site_config(), "test-key".to_string());
    let engine = ScrapeEngine::new(pipeline);

    let result = engine.run().await;
    assert!(result.is_ok());
    ma_mock.assert();
    vt_mock.assert();

    // data.json round-trips the regions, in configured order, with field values intact.
    let json_path = temp_dir.path().join("data.json");
    assert!(json_path.exists());
    let output: RunOutput = serde_json::from_slice(&std::fs::read(&json_path).unwrap()).unwrap();

    assert_eq!(output.config.days_back, 7);
    assert_eq!(output.regions.len(), 2);
    assert_eq!(output.regions[0].code, "US-MA");
    assert_eq!(output.regions[1].code, "US-VT");
    assert!(output.regions[1].observations.is_empty());

    let snowy = &output.regions[0].observations[0];
    assert_eq!(snowy.species, "Snowy Owl");
    assert_eq!(snowy.count, Count::Known(2));
    assert_eq!(
        snowy.checklist_url.as_deref(),
        Some("https://ebird.org/checklist/S123456789")
    );
    assert_eq!(snowy.observer, "Jane Birder");

    let gyrfalcon = &output.regions[0].observations[1];
    assert_eq!(gyrfalcon.count, Count::Unknown);
    assert_eq!(gyrfalcon.location, "Unknown location");
    assert_eq!(gyrfalcon.checklist_url, None);

    // The raw pretty-printed JSON carries the "X" sentinel for unknown counts.
    let raw_json = std::fs::read_to_string(&json_path).unwrap();
    assert!(raw_json.contains("\"count\": \"X\""));

    // index.html renders both regions in order with the page chrome.
    let html = std::fs::read_to_string(temp_dir.path().join("index.html")).unwrap();
    assert!(html.contains("<h2>Massachusetts</h2>"));
    assert!(html.contains("<h2>Vermont</h2>"));
    assert!(html.find("<h2>Massachusetts</h2>").unwrap() < html.find("<h2>Vermont</h2>").unwrap());
    assert!(html.contains(
        r#"<a href="https://ebird.org/species/snoowl1" target="_blank">Snowy Owl</a>"#
    ));
    assert!(html.contains(r#"<span class="count">2</span>"#));
    assert!(html.contains(r#"<span class="count">present</span>"#));
    assert!(html.contains("No notable sightings in the past week."));
    assert!(html.contains("Last updated:"));
}

#[tokio::test]
async fn test_end_to_end_with_failed_region() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/obs/US-MA/recent/notable");
        then.status(403);
    });
    let vt_mock = server.mock(|when, then| {
        when.method(GET).path("/data/obs/US-VT/recent/notable");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([{"comName": "Boreal Owl", "howMany": 1}]));
    });

    let config = cli_config(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = SightingsPipeline::new(storage, config, site_config(), "test-key".to_string());
    let engine = ScrapeEngine::new(pipeline);

    // A per-region HTTP failure does not fail the run.
    let result = engine.run().await;
    assert!(result.is_ok());
    vt_mock.assert();

    let json_path = temp_dir.path().join("data.json");
    let output: RunOutput = serde_json::from_slice(&std::fs::read(&json_path).unwrap()).unwrap();

    assert_eq!(output.regions.len(), 2);
    assert_eq!(output.regions[0].code, "US-MA");
    assert!(output.regions[0].observations.is_empty());
    let error = output.regions[0].error.as_deref().unwrap();
    assert!(error.contains("403"));
    assert_eq!(output.regions[1].observations.len(), 1);
    assert!(output.regions[1].error.is_none());
}

#[tokio::test]
async fn test_end_to_end_escapes_api_markup() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/obs/US-MA/recent/notable");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {
                    "comName": "<img src=x onerror=alert(1)>",
                    "locName": "Beach & <Dunes>"
                }
            ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/data/obs/US-VT/recent/notable");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let config = cli_config(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = SightingsPipeline::new(storage, config, site_config(), "test-key".to_string());
    let engine = ScrapeEngine::new(pipeline);

    engine.run().await.unwrap();

    let html = std::fs::read_to_string(temp_dir.path().join("index.html")).unwrap();
    assert!(!html.contains("<img src=x"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(html.contains("Beach &amp; &lt;Dunes&gt;"));
}

#[tokio::test]
async fn test_malformed_response_fails_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/obs/US-MA/recent/notable");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("{\"unexpected\": \"shape\"}");
    });

    let config = cli_config(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = SightingsPipeline::new(storage, config, site_config(), "test-key".to_string());
    let engine = ScrapeEngine::new(pipeline);

    let result = engine.run().await;
    assert!(result.is_err());

    // Nothing was written.
    assert!(!temp_dir.path().join("data.json").exists());
    assert!(!temp_dir.path().join("index.html").exists());
}

#[test]
fn test_cli_config_defaults() {
    use clap::Parser;

    let config = CliConfig::parse_from(["ebird-notables"]);
    assert_eq!(config.config_path, "config.json");
    assert_eq!(config.output_path, "docs");
    assert_eq!(config.api_base, "https://api.ebird.org/v2");
    assert!(!config.verbose);

    let config = CliConfig::parse_from([
        "ebird-notables",
        "--config-path",
        "regions.json",
        "--output-path",
        "public",
        "--verbose",
    ]);
    assert_eq!(config.config_path, "regions.json");
    assert_eq!(config.output_path, "public");
    assert_eq!(config.api_base(), "https://api.ebird.org/v2");
    assert!(config.verbose);
}
