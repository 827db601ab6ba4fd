use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::application::ports::{CityDataError, CityDataSource};
use crate::domain::CityPoint;

pub const DEFAULT_CITY_DATA_URL: &str = "https://data.ibb.gov.tr/dataset/8789b75c-bae9-4acb-8287-bfc0ba88c8ea/resource/9585ab4a-d160-4541-8a41-b86eeec4c1cc/download/sehir_tuvaletleri_verisi.geojson";
pub const DEFAULT_CITY_DATA_TIMEOUT: Duration = Duration::from_secs(10);

/// Public toilet locations from the Istanbul open-data portal (GeoJSON).
pub struct IbbOpenDataClient {
    client: Client,
    url: String,
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

impl IbbOpenDataClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, CityDataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CityDataError::Unavailable(format!("http client: {}", e)))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CityDataSource for IbbOpenDataClient {
    async fn fetch_points(&self) -> Result<Vec<CityPoint>, CityDataError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CityDataError::Unavailable(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| CityDataError::Unavailable(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| CityDataError::Unavailable(e.to_string()))?;

        let points = parse_city_points(&body)?;
        tracing::debug!(points = points.len(), "City data fetched");
        Ok(points)
    }
}

/// Maps GeoJSON features to points. Missing properties take `0.0` or `""`.
pub fn parse_city_points(body: &[u8]) -> Result<Vec<CityPoint>, CityDataError> {
    let collection: FeatureCollection =
        serde_json::from_slice(body).map_err(|e| CityDataError::Malformed(e.to_string()))?;

    Ok(collection
        .features
        .into_iter()
        .map(|feature| {
            let properties = feature.properties.unwrap_or_default();
            CityPoint {
                x: number(&properties, "X"),
                y: number(&properties, "Y"),
                mahal_adi: text(&properties, "MAHAL_ADI"),
                ilce: text(&properties, "ILCE"),
            }
        })
        .collect())
}

fn number(properties: &Map<String, Value>, key: &str) -> f64 {
    match properties.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse().unwrap_or_default(),
        _ => 0.0,
    }
}

fn text(properties: &Map<String, Value>, key: &str) -> String {
    match properties.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
