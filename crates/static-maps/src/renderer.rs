//! Static map URL rendering.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use incident_core::{Coordinates, Geocoder, MapError, MapReference, MapRenderer};
use tracing::{debug, warn};
use url::Url;

use crate::bounds::BoundingBox;
use crate::config::MapsConfig;
use crate::error::MapsError;

/// Renders a Static Maps URL for a set of places.
pub struct StaticMapRenderer<G> {
    geocoder: G,
    config: MapsConfig,
}

impl<G: Geocoder> StaticMapRenderer<G> {
    pub fn new(geocoder: G, config: MapsConfig) -> Self {
        Self { geocoder, config }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Geocode every place, at most `geocode_concurrency` at a time,
    /// keeping input order and dropping the ones that fail.
    async fn resolve(&self, locations: &[String]) -> Vec<Coordinates> {
        let limit = self.config.geocode_concurrency.max(1);
        let lookups: Vec<_> = locations
            .iter()
            .map(|loc| self.geocoder.geocode(loc))
            .collect();
        let results: Vec<_> = stream::iter(lookups)
            .buffered(limit)
            .collect()
            .await;

        locations
            .iter()
            .zip(results)
            .filter_map(|(loc, result)| match result {
                Ok(coords) => Some(coords),
                Err(e) => {
                    warn!("Failed to geocode location {}: {}", loc, e);
                    None
                }
            })
            .collect()
    }

    /// Build the map URL for already resolved points.
    pub fn map_url(&self, points: &[Coordinates]) -> Result<Option<Url>, MapsError> {
        let Some(bounds) = BoundingBox::from_points(points) else {
            return Ok(None);
        };

        let center = bounds.center().to_string();
        let zoom = bounds.zoom().to_string();
        let scale = self.config.scale.to_string();
        let markers: Vec<String> = points
            .iter()
            .map(|p| format!("icon:{}|scale:1|{}", self.config.marker_icon, p))
            .collect();

        let mut params: Vec<(&str, &str)> = vec![
            ("center", center.as_str()),
            ("zoom", zoom.as_str()),
            ("size", self.config.size.as_str()),
        ];
        params.extend(markers.iter().map(|m| ("markers", m.as_str())));
        params.extend([
            ("key", self.config.api_key.as_str()),
            ("language", self.config.language.as_str()),
            ("format", "png"),
            ("scale", scale.as_str()),
        ]);

        Ok(Some(Url::parse_with_params(&self.config.static_map_url, &params)?))
    }
}

#[async_trait]
impl<G: Geocoder> MapRenderer for StaticMapRenderer<G> {
    async fn render(&self, locations: &[String]) -> Result<MapReference, MapError> {
        if locations.is_empty() {
            return Ok(MapReference::empty());
        }

        let points = self.resolve(locations).await;
        debug!("Geocoded {}/{} locations", points.len(), locations.len());

        match self.map_url(&points) {
            Ok(Some(url)) => Ok(MapReference::new(url.to_string())),
            Ok(None) => {
                warn!("No location could be geocoded, rendering without map");
                Ok(MapReference::empty())
            }
            Err(e) => Err(MapError::RenderFailed(e.to_string())),
        }
    }
}
