use serde::Serialize;

/// A public toilet from the municipal open-data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPoint {
    pub x: f64,
    pub y: f64,
    pub mahal_adi: String,
    pub ilce: String,
}
