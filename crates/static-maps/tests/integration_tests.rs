//! Integration tests for the Google geocoder against a local fake.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use incident_core::{GeocodeError, Geocoder, MapRenderer};
use serde_json::{json, Value};
use static_maps::{CachingGeocoder, GoogleGeocoder, MapsConfig, StaticMapRenderer};

async fn geocode(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if params.get("key").map(String::as_str) != Some("good-key") {
        return (
            StatusCode::OK,
            Json(json!({
                "results": [],
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid."
            })),
        );
    }

    let address = params.get("address").cloned().unwrap_or_default();
    let location = match address.as_str() {
        "חולון, Israel" => Some((32.0158, 34.7874)),
        "תל אביב, Israel" => Some((32.0853, 34.7818)),
        _ => None,
    };

    match location {
        Some((lat, lng)) => (
            StatusCode::OK,
            Json(json!({
                "results": [{"geometry": {"location": {"lat": lat, "lng": lng}}}],
                "status": "OK"
            })),
        ),
        None => (
            StatusCode::OK,
            Json(json!({"results": [], "status": "ZERO_RESULTS"})),
        ),
    }
}

async fn start(key: &str) -> MapsConfig {
    let app = Router::new().route("/geocode/json", get(geocode));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MapsConfig::new(key).with_geocode_url(format!("http://{}/geocode/json", addr))
}

#[tokio::test]
async fn test_geocode_known_place() {
    let geocoder = GoogleGeocoder::new(start("good-key").await).unwrap();

    let coords = geocoder.geocode("חולון").await.unwrap();
    assert_eq!(coords.to_string(), "32.015800,34.787400");
}

#[tokio::test]
async fn test_zero_results_is_no_results() {
    let geocoder = GoogleGeocoder::new(start("good-key").await).unwrap();

    let err = geocoder.geocode("עיר שלא קיימת").await.unwrap_err();
    assert!(matches!(err, GeocodeError::NoResults(place) if place == "עיר שלא קיימת"));
}

#[tokio::test]
async fn test_denied_key_is_rejection() {
    let geocoder = GoogleGeocoder::new(start("bad-key").await).unwrap();

    let err = geocoder.geocode("חולון").await.unwrap_err();
    match err {
        GeocodeError::Rejected(message) => assert!(message.contains("REQUEST_DENIED")),
        other => panic!("unexpected: {:?}", other),
    }
}

#[tokio::test]
async fn test_render_through_cached_geocoder() {
    let config = start("good-key").await;
    let geocoder = CachingGeocoder::new(GoogleGeocoder::new(config.clone()).unwrap());
    let renderer = StaticMapRenderer::new(geocoder, config);

    let locations = vec![
        "תל אביב".to_string(),
        "חולון".to_string(),
        "עיר שלא קיימת".to_string(),
    ];
    let first = renderer.render(&locations).await.unwrap();
    let second = renderer.render(&locations).await.unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(renderer.geocoder().len().await, 2);
}
