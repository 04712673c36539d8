//! Configuration for the maps provider.

use std::time::Duration;

/// Default Geocoding API endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Default Static Maps API endpoint.
pub const DEFAULT_STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Default number of geocoding requests in flight at once.
pub const DEFAULT_GEOCODE_CONCURRENCY: usize = 4;

const DEFAULT_MARKER_ICON: &str =
    "https://maps.google.com/mapfiles/kml/shapes/placemark_square_highlight.png";

/// Configuration for geocoding and map rendering.
#[derive(Clone)]
pub struct MapsConfig {
    /// API key used for both geocoding and static maps.
    pub api_key: String,
    /// Geocoding endpoint.
    pub geocode_url: String,
    /// Static map endpoint.
    pub static_map_url: String,
    /// Appended to every place name before geocoding ("{place}, {region}").
    pub region: Option<String>,
    /// Language of geocoding results and map labels.
    pub language: String,
    /// Image size, `WIDTHxHEIGHT`.
    pub size: String,
    /// Pixel density multiplier.
    pub scale: u8,
    /// Marker icon URL.
    pub marker_icon: String,
    /// Timeout for each geocoding request.
    pub timeout: Duration,
    /// Upper bound on concurrent geocoding requests for one render.
    pub geocode_concurrency: usize,
}

impl MapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            static_map_url: DEFAULT_STATIC_MAP_URL.to_string(),
            region: Some("Israel".to_string()),
            language: "he".to_string(),
            size: "800x600".to_string(),
            scale: 2,
            marker_icon: DEFAULT_MARKER_ICON.to_string(),
            timeout: Duration::from_secs(10),
            geocode_concurrency: DEFAULT_GEOCODE_CONCURRENCY,
        }
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region.filter(|r| !r.trim().is_empty());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_geocode_url(mut self, url: impl Into<String>) -> Self {
        self.geocode_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Limit concurrent geocoding requests. Zero is treated as one.
    pub fn with_geocode_concurrency(mut self, limit: usize) -> Self {
        self.geocode_concurrency = limit.max(1);
        self
    }

    /// The address string sent to the geocoder for a place.
    pub fn address_for(&self, place: &str) -> String {
        match &self.region {
            Some(region) => format!("{}, {}", place, region),
            None => place.to_string(),
        }
    }
}

impl std::fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsConfig")
            .field("api_key", &"<redacted>")
            .field("geocode_url", &self.geocode_url)
            .field("static_map_url", &self.static_map_url)
            .field("region", &self.region)
            .field("language", &self.language)
            .field("geocode_concurrency", &self.geocode_concurrency)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_for() {
        let config = MapsConfig::new("key");
        assert_eq!(config.address_for("חולון"), "חולון, Israel");

        let config = config.with_region(None);
        assert_eq!(config.address_for("Holon"), "Holon");
    }

    #[test]
    fn test_blank_region_disables_suffix() {
        let config = MapsConfig::new("key").with_region(Some("  ".to_string()));
        assert!(config.region.is_none());
    }

    #[test]
    fn test_geocode_concurrency_is_at_least_one() {
        assert_eq!(MapsConfig::new("key").geocode_concurrency, DEFAULT_GEOCODE_CONCURRENCY);
        assert_eq!(MapsConfig::new("key").with_geocode_concurrency(0).geocode_concurrency, 1);
        assert_eq!(MapsConfig::new("key").with_geocode_concurrency(8).geocode_concurrency, 8);
    }
}
