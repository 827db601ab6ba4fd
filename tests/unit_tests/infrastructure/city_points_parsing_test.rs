use safepath::application::ports::CityDataError;
use safepath::infrastructure::city_data::parse_city_points;

#[test]
fn given_geojson_features_when_parsing_then_properties_map_to_points() {
    let body = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"X": 29.02, "Y": 41.04, "MAHAL_ADI": "Sinanpaşa", "ILCE": "BEŞİKTAŞ"}},
            {"type": "Feature", "properties": {"X": "28,98", "Y": "40.99", "MAHAL_ADI": "Rasimpaşa", "ILCE": "KADIKÖY"}}
        ]
    }"#.as_bytes();

    let points = parse_city_points(body).unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].x, 29.02);
    assert_eq!(points[0].mahal_adi, "Sinanpaşa");
    assert_eq!(points[1].x, 28.98);
    assert_eq!(points[1].y, 40.99);
    assert_eq!(points[1].ilce, "KADIKÖY");
}

#[test]
fn given_missing_properties_when_parsing_then_defaults_apply() {
    let body = r#"{"features": [{"properties": {"ILCE": "ŞİŞLİ"}}, {"geometry": null}]}"#.as_bytes();

    let points = parse_city_points(body).unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].x, 0.0);
    assert_eq!(points[0].mahal_adi, "");
    assert_eq!(points[0].ilce, "ŞİŞLİ");
    assert_eq!(points[1].ilce, "");
}

#[test]
fn given_no_features_key_when_parsing_then_empty() {
    assert!(parse_city_points(b"{}").unwrap().is_empty());
}

#[test]
fn given_invalid_body_when_parsing_then_malformed() {
    assert!(matches!(
        parse_city_points(b"<html>maintenance</html>"),
        Err(CityDataError::Malformed(_))
    ));
    assert!(matches!(
        parse_city_points(b"[1, 2, 3]"),
        Err(CityDataError::Malformed(_))
    ));
}
