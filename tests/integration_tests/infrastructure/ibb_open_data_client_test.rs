use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use safepath::application::ports::{CityDataError, CityDataSource};
use safepath::infrastructure::city_data::IbbOpenDataClient;

use crate::helpers::mock_server::MockServer;

const GEOJSON: &str = r#"{"type":"FeatureCollection","features":[
    {"type":"Feature","properties":{"X":28.97,"Y":41.01,"MAHAL_ADI":"Sinanpaşa","ILCE":"BEŞİKTAŞ"}},
    {"type":"Feature","properties":{"ILCE":"KADIKÖY"}}
]}"#;

fn client_for(server: &MockServer, timeout: Duration) -> IbbOpenDataClient {
    IbbOpenDataClient::new(server.url("/toilets.geojson"), timeout).unwrap()
}

#[tokio::test]
async fn given_geojson_upstream_when_fetching_then_points_are_mapped() {
    let server = MockServer::start(Router::new().route("/toilets.geojson", get(|| async { GEOJSON }))).await;
    let client = client_for(&server, Duration::from_secs(5));

    let points = client.fetch_points().await.unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].mahal_adi, "Sinanpaşa");
    assert_eq!(points[0].x, 28.97);
    assert_eq!(points[1].x, 0.0);
    assert_eq!(points[1].ilce, "KADIKÖY");
}

#[tokio::test]
async fn given_upstream_error_status_when_fetching_then_unavailable() {
    let server = MockServer::start(Router::new().route(
        "/toilets.geojson",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    ))
    .await;
    let client = client_for(&server, Duration::from_secs(5));

    let result = client.fetch_points().await;

    assert!(matches!(result, Err(CityDataError::Unavailable(_))));
}

#[tokio::test]
async fn given_slow_upstream_when_fetching_then_times_out_as_unavailable() {
    let server = MockServer::start(Router::new().route(
        "/toilets.geojson",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            GEOJSON
        }),
    ))
    .await;
    let client = client_for(&server, Duration::from_millis(200));

    let result = client.fetch_points().await;

    assert!(matches!(result, Err(CityDataError::Unavailable(_))));
}

#[tokio::test]
async fn given_non_json_body_when_fetching_then_malformed() {
    let server = MockServer::start(
        Router::new().route("/toilets.geojson", get(|| async { "<html>bakımda</html>" })),
    )
    .await;
    let client = client_for(&server, Duration::from_secs(5));

    let result = client.fetch_points().await;

    assert!(matches!(result, Err(CityDataError::Malformed(_))));
}

#[tokio::test]
async fn given_nothing_listening_when_fetching_then_unavailable() {
    let client =
        IbbOpenDataClient::new("http://127.0.0.1:9/none".to_string(), Duration::from_secs(2)).unwrap();

    let result = client.fetch_points().await;

    assert!(matches!(result, Err(CityDataError::Unavailable(_))));
}
