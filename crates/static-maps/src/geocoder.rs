//! Place name lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use incident_core::{Coordinates, GeocodeError, Geocoder};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::MapsConfig;
use crate::error::MapsError;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Geocoder backed by the Google Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    http: Client,
    config: MapsConfig,
}

impl GoogleGeocoder {
    pub fn new(config: MapsConfig) -> Result<Self, MapsError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Look up a place and return the first result.
    pub async fn lookup(&self, place: &str) -> Result<Coordinates, MapsError> {
        let address = self.config.address_for(place);
        debug!("Geocoding {}", address);

        let response = self
            .http
            .get(&self.config.geocode_url)
            .query(&[
                ("address", address.as_str()),
                ("key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| MapsError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MapsError::Rejected {
                status: status.to_string(),
                message: body,
            });
        }

        let parsed: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| MapsError::Http(e.without_url()))?;
        match parsed.status.as_str() {
            "OK" | "ZERO_RESULTS" | "" => {}
            other => {
                return Err(MapsError::Rejected {
                    status: other.to_string(),
                    message: parsed.error_message.unwrap_or_default(),
                })
            }
        }

        parsed
            .results
            .first()
            .map(|r| Coordinates::new(r.geometry.location.lat, r.geometry.location.lng))
            .ok_or_else(|| MapsError::NoResults(place.to_string()))
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, place: &str) -> Result<Coordinates, GeocodeError> {
        Ok(self.lookup(place).await?)
    }
}

/// Wraps a geocoder and remembers every successful lookup.
///
/// Alert locations repeat from poll to poll; caching keeps the quota down and
/// makes the rendered map URL stable for an unchanged location set.
/// Failures are not cached.
///
/// Entries are never evicted and live as long as the process. The cache holds
/// one entry per distinct place name, and alert place names come from a fixed
/// national list, so it stops growing once the places seen have been cached.
/// Incident expiry (`INCIDENT_TTL`) does not touch it.
pub struct CachingGeocoder<G> {
    inner: G,
    cache: RwLock<HashMap<String, Coordinates>>,
}

impl<G: Geocoder> CachingGeocoder<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached places.
    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }
}

#[async_trait]
impl<G: Geocoder> Geocoder for CachingGeocoder<G> {
    async fn geocode(&self, place: &str) -> Result<Coordinates, GeocodeError> {
        if let Some(coords) = self.cache.read().await.get(place) {
            return Ok(*coords);
        }

        let coords = self.inner.geocode(place).await?;
        self.cache.write().await.insert(place.to_string(), coords);
        Ok(coords)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingGeocoder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, place: &str) -> Result<Coordinates, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if place == "nowhere" {
                return Err(GeocodeError::NoResults(place.to_string()));
            }
            Ok(Coordinates::new(32.0, 34.8))
        }
    }

    #[tokio::test]
    async fn test_cache_hits_skip_inner() {
        let cache = CachingGeocoder::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });

        cache.geocode("Holon").await.unwrap();
        cache.geocode("Holon").await.unwrap();

        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache = CachingGeocoder::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });

        assert!(cache.geocode("nowhere").await.is_err());
        assert!(cache.geocode("nowhere").await.is_err());

        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_grows_only_with_distinct_places() {
        let cache = CachingGeocoder::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });

        for _ in 0..50 {
            for place in ["Holon", "Bat Yam", "Sderot"] {
                cache.geocode(place).await.unwrap();
            }
        }

        assert_eq!(cache.len().await, 3);
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 3);
    }
}
