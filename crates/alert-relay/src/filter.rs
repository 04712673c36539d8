//! Location filter applied to each batch before correlation.

use incident_core::Alert;

/// Keeps only alerts with a location containing the filter text.
///
/// An empty filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    needle: Option<String>,
}

impl LocationFilter {
    /// Build a filter. Blank text disables filtering.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.needle.is_some()
    }

    pub fn matches(&self, alert: &Alert) -> bool {
        match &self.needle {
            Some(needle) => alert.mentions(needle),
            None => true,
        }
    }

    /// Drop the alerts that do not match.
    pub fn apply(&self, alerts: Vec<Alert>) -> Vec<Alert> {
        if !self.is_enabled() {
            return alerts;
        }
        alerts.into_iter().filter(|alert| self.matches(alert)).collect()
    }
}
