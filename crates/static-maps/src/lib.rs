//! Geocoding and static map rendering.
//!
//! - [`GoogleGeocoder`] resolves place names through the Geocoding API
//! - [`CachingGeocoder`] remembers successful lookups for the process lifetime
//! - [`StaticMapRenderer`] turns a list of places into a Static Maps URL with
//!   one marker per place, centered on their bounding box
//!
//! Places that fail to geocode are left off the map. If none can be placed
//! the renderer returns an empty [`MapReference`](incident_core::MapReference).

pub mod bounds;
pub mod config;
pub mod error;
pub mod geocoder;
pub mod renderer;

pub use bounds::{zoom_for_spread, BoundingBox};
pub use config::MapsConfig;
pub use error::MapsError;
pub use geocoder::{CachingGeocoder, GoogleGeocoder};
pub use renderer::StaticMapRenderer;
