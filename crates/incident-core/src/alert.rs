//! Alert records as delivered by the alert source.

use serde::{Deserialize, Serialize};

/// A single threat alert.
///
/// Field names on the wire follow the upstream feed (`cat`, `data`, `desc`).
/// Only `id` is mandatory; everything else defaults to empty so a sparse
/// record still parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Opaque identifier. Compared as a string to pick the most recent alert.
    pub id: String,

    /// Alert category code.
    #[serde(rename = "cat", default)]
    pub category: String,

    /// Human readable alert type, used to pick the icon.
    #[serde(default)]
    pub title: String,

    /// Affected place names.
    #[serde(rename = "data", default)]
    pub locations: Vec<String>,

    /// Free-text instructions.
    #[serde(rename = "desc", default)]
    pub description: String,
}

impl Alert {
    /// Create an alert with the given id, title and locations.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        locations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            category: String::new(),
            title: title.into(),
            locations: locations.into_iter().map(Into::into).collect(),
            description: String::new(),
        }
    }

    /// Set the category code.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether any location of this alert contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.locations.iter().any(|loc| loc.contains(needle))
    }
}

/// A geocoded point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}
