//! Map renderer doubles.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use incident_core::{MapError, MapReference, MapRenderer};

/// Renders `map://a|b|c` for locations `a, b, c`; empty input gives an
/// empty reference.
#[derive(Debug, Default)]
pub struct FixedMapRenderer {
    renders: AtomicUsize,
}

impl FixedMapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of render calls so far.
    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MapRenderer for FixedMapRenderer {
    async fn render(&self, locations: &[String]) -> Result<MapReference, MapError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if locations.is_empty() {
            return Ok(MapReference::empty());
        }
        Ok(MapReference::new(format!("map://{}", locations.join("|"))))
    }
}

/// A renderer that always fails.
#[derive(Debug, Clone, Default)]
pub struct FailingMapRenderer;

#[async_trait]
impl MapRenderer for FailingMapRenderer {
    async fn render(&self, _locations: &[String]) -> Result<MapReference, MapError> {
        Err(MapError::Unavailable("FailingMapRenderer".to_string()))
    }
}
