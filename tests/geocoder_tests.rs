// HTTP geocoder tests against a mock postal-code service

use sitter_match::models::Coordinates;
use sitter_match::services::{GeocodeError, HttpGeocoder, LocationResolver, StaticGeocoder};
use std::collections::HashMap;
use std::time::Duration;

fn geocoder(endpoint: String) -> HttpGeocoder {
    HttpGeocoder::new(
        endpoint,
        Duration::from_secs(2),
        100,
        StaticGeocoder::new(HashMap::new(), Coordinates::new(1.0, 2.0)),
    )
    .unwrap()
}

#[tokio::test]
async fn test_resolves_and_caches_remote_lookup() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/us/60601")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"post code": "60601", "places": [{"place name": "Chicago", "latitude": "41.8858", "longitude": "-87.6181"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let geocoder = geocoder(format!("{}/us/", server.url()));

    assert_eq!(geocoder.resolve("60601").await, Coordinates::new(41.8858, -87.6181));
    assert_eq!(geocoder.resolve(" 60601 ").await, Coordinates::new(41.8858, -87.6181));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_not_found_falls_back_to_static_table() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/us/90210")
        .with_status(404)
        .create_async()
        .await;
    let _unknown = server
        .mock("GET", "/us/00000")
        .with_status(404)
        .create_async()
        .await;

    let geocoder = geocoder(format!("{}/us", server.url()));

    assert!(matches!(geocoder.lookup("90210").await, Err(GeocodeError::Status(404))));
    assert_eq!(geocoder.resolve("90210").await, Coordinates::new(34.0901, -118.4065));
    assert_eq!(geocoder.resolve("00000").await, Coordinates::new(1.0, 2.0));
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/us/10003")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"places": []}"#)
        .create_async()
        .await;

    let geocoder = geocoder(format!("{}/us", server.url()));

    assert!(matches!(
        geocoder.lookup("10003").await,
        Err(GeocodeError::InvalidResponse(_))
    ));
    assert_eq!(geocoder.resolve("10003").await, Coordinates::new(40.7318, -73.9873));
}
