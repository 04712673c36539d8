//! Bounding box and zoom selection.

use incident_core::Coordinates;

/// Spread thresholds (degrees) and the zoom used above each of them.
const ZOOM_TIERS: &[(f64, u8)] = &[(0.5, 9), (0.2, 10), (0.1, 11), (0.05, 12)];

/// Zoom used when all points are within the smallest tier.
pub const DEFAULT_ZOOM: u8 = 13;

/// Pick a zoom level for a spread in degrees. Wider spread, lower zoom.
pub fn zoom_for_spread(spread: f64) -> u8 {
    ZOOM_TIERS
        .iter()
        .find(|(threshold, _)| spread > *threshold)
        .map(|(_, zoom)| *zoom)
        .unwrap_or(DEFAULT_ZOOM)
}

/// Smallest lat/lng rectangle containing a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Box around a single point.
    pub fn around(point: Coordinates) -> Self {
        Self {
            min_lat: point.lat,
            max_lat: point.lat,
            min_lng: point.lng,
            max_lng: point.lng,
        }
    }

    /// Box around all points, `None` if there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Coordinates>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::around(*first);
        for point in iter {
            bounds.extend(*point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: Coordinates) {
        self.min_lat = self.min_lat.min(point.lat);
        self.max_lat = self.max_lat.max(point.lat);
        self.min_lng = self.min_lng.min(point.lng);
        self.max_lng = self.max_lng.max(point.lng);
    }

    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// The larger of the latitude and longitude extents.
    pub fn spread(&self) -> f64 {
        (self.max_lat - self.min_lat).max(self.max_lng - self.min_lng)
    }

    pub fn zoom(&self) -> u8 {
        zoom_for_spread(self.spread())
    }
}
