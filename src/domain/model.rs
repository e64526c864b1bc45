use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A geographic area recognized by the eBird API, e.g. `US-MA`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
}

/// One observation as the eBird API returns it. Every field is optional:
/// the API omits fields freely, so the mapping into [`FormattedObservation`]
/// supplies a documented default for each.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawObservation {
    pub com_name: Option<String>,
    pub sci_name: Option<String>,
    pub how_many: Option<u32>,
    pub loc_name: Option<String>,
    pub obs_dt: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub sub_id: Option<String>,
    pub species_code: Option<String>,
    pub loc_id: Option<String>,
    pub user_display_name: Option<String>,
    pub obs_valid: Option<bool>,
    pub obs_reviewed: Option<bool>,
}

/// Number of individuals seen. eBird reports `X` when the observer noted the
/// species as present without counting; that sentinel survives into the JSON
/// output as the literal string `"X"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Count {
    Known(u32),
    Unknown,
}

impl From<Option<u32>> for Count {
    fn from(how_many: Option<u32>) -> Self {
        match how_many {
            Some(n) => Count::Known(n),
            None => Count::Unknown,
        }
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Count::Known(n) => serializer.serialize_u32(*n),
            Count::Unknown => serializer.serialize_str("X"),
        }
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => n
                .as_u64()
                .map(|n| Count::Known(n as u32))
                .ok_or_else(|| D::Error::custom("count must be a non-negative integer")),
            serde_json::Value::String(s) if s == "X" => Ok(Count::Unknown),
            other => Err(D::Error::custom(format!(
                "expected a count or \"X\", got {}",
                other
            ))),
        }
    }
}

/// Display-ready record derived 1:1 from a [`RawObservation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedObservation {
    pub species: String,
    pub scientific_name: String,
    pub count: Count,
    pub location: String,
    pub date: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub checklist_url: Option<String>,
    pub species_url: Option<String>,
    pub location_id: String,
    pub observer: String,
    pub is_valid: bool,
    pub is_reviewed: bool,
}

impl From<RawObservation> for FormattedObservation {
    /// Total mapping: never fails, absent fields degrade to defaults.
    fn from(raw: RawObservation) -> Self {
        FormattedObservation {
            species: raw.com_name.unwrap_or_else(|| "Unknown".to_string()),
            scientific_name: raw.sci_name.unwrap_or_default(),
            count: Count::from(raw.how_many),
            location: raw
                .loc_name
                .unwrap_or_else(|| "Unknown location".to_string()),
            date: raw.obs_dt.unwrap_or_default(),
            lat: raw.lat,
            lng: raw.lng,
            checklist_url: derive_url("https://ebird.org/checklist", raw.sub_id),
            species_url: derive_url("https://ebird.org/species", raw.species_code),
            location_id: raw.loc_id.unwrap_or_default(),
            observer: raw.user_display_name.unwrap_or_default(),
            is_valid: raw.obs_valid.unwrap_or(true),
            is_reviewed: raw.obs_reviewed.unwrap_or(false),
        }
    }
}

fn derive_url(base: &str, id: Option<String>) -> Option<String> {
    match id {
        Some(id) if !id.is_empty() => Some(format!("{}/{}", base, id)),
        _ => None,
    }
}

/// Raw fetch outcome for one region, before formatting.
#[derive(Debug, Clone)]
pub struct RegionFetch {
    pub region: Region,
    pub observations: Vec<RawObservation>,
    pub error: Option<String>,
}

/// One configured region's slice of the run output. `error` is set only when
/// the fetch failed, and is omitted from the JSON otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionResult {
    pub code: String,
    pub name: String,
    pub observations: Vec<FormattedObservation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RegionFetch> for RegionResult {
    fn from(fetch: RegionFetch) -> Self {
        RegionResult {
            code: fetch.region.code,
            name: fetch.region.name,
            observations: fetch
                .observations
                .into_iter()
                .map(FormattedObservation::from)
                .collect(),
            error: fetch.error,
        }
    }
}

/// Complete payload of one run, written verbatim to `data.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub last_updated: String,
    pub config: crate::config::site::SiteConfig,
    pub regions: Vec<RegionResult>,
}
