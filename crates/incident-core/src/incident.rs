//! Incident state and the process-wide incident set.

use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use tokio::time::Instant;

/// Stable identifier for an incident, assigned on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IncidentId(u64);

impl IncidentId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "incident-{}", self.0)
    }
}

/// Reference to a rendered map image. Empty when nothing could be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MapReference(String);

impl MapReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// A reference that points at nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle returned by the notification channel for a sent message.
///
/// The channel decides whether a message carries media; the handle remembers
/// it so later edits can pick the right operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageHandle {
    id: String,
    has_media: bool,
}

impl MessageHandle {
    /// Handle for a message that carries an image.
    pub fn media(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            has_media: true,
        }
    }

    /// Handle for a text-only message.
    pub fn text(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            has_media: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn has_media(&self) -> bool {
        self.has_media
    }
}

impl fmt::Display for MessageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// One externally visible notification and the alerts folded into it.
#[derive(Debug, Clone)]
pub struct Incident {
    /// Id of the most recent alert absorbed.
    pub latest_alert_id: String,
    /// Handle of the notification backing this incident.
    pub message_handle: MessageHandle,
    /// Accumulated place names, in first-seen order. Never empty.
    pub locations: Vec<String>,
    /// Text last confirmed delivered.
    pub rendered_content: String,
    /// Map last confirmed delivered.
    pub map_reference: MapReference,
    pub created_at: Instant,
    pub updated_at: Instant,
}

/// All incidents known to the process, in creation order.
#[derive(Debug, Default)]
pub struct IncidentSet {
    incidents: IndexMap<IncidentId, Incident>,
    next_id: u64,
}

impl IncidentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new incident and return its id.
    pub fn insert(&mut self, incident: Incident) -> IncidentId {
        self.next_id += 1;
        let id = IncidentId(self.next_id);
        self.incidents.insert(id, incident);
        id
    }

    pub fn get(&self, id: IncidentId) -> Option<&Incident> {
        self.incidents.get(&id)
    }

    pub fn get_mut(&mut self, id: IncidentId) -> Option<&mut Incident> {
        self.incidents.get_mut(&id)
    }

    /// Find the incident whose most recent alert has this id.
    pub fn find_by_alert_id(&self, alert_id: &str) -> Option<(IncidentId, &Incident)> {
        self.incidents
            .iter()
            .find(|(_, incident)| incident.latest_alert_id == alert_id)
            .map(|(id, incident)| (*id, incident))
    }

    /// First incident (in creation order) matching the predicate.
    pub fn find<F>(&self, mut predicate: F) -> Option<(IncidentId, &Incident)>
    where
        F: FnMut(&Incident) -> bool,
    {
        self.incidents
            .iter()
            .find(|(_, incident)| predicate(incident))
            .map(|(id, incident)| (*id, incident))
    }

    pub fn iter(&self) -> impl Iterator<Item = (IncidentId, &Incident)> {
        self.incidents.iter().map(|(id, incident)| (*id, incident))
    }

    /// Drop incidents not updated within `ttl` of `now`. Returns how many
    /// were removed.
    pub fn evict_idle(&mut self, now: Instant, ttl: Duration) -> usize {
        let before = self.incidents.len();
        self.incidents
            .retain(|_, incident| now.saturating_duration_since(incident.updated_at) < ttl);
        before - self.incidents.len()
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(alert_id: &str, locations: &[&str], at: Instant) -> Incident {
        Incident {
            latest_alert_id: alert_id.to_string(),
            message_handle: MessageHandle::media(format!("msg-{}", alert_id)),
            locations: locations.iter().map(|s| s.to_string()).collect(),
            rendered_content: String::new(),
            map_reference: MapReference::empty(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_ids_are_stable_and_unique() {
        let now = Instant::now();
        let mut set = IncidentSet::new();
        let first = set.insert(incident("1", &["a"], now));
        let second = set.insert(incident("2", &["b"], now));

        assert_ne!(first, second);
        assert_eq!(set.get(first).unwrap().latest_alert_id, "1");

        set.get_mut(first).unwrap().latest_alert_id = "3".to_string();
        assert_eq!(set.find_by_alert_id("3").map(|(id, _)| id), Some(first));
        assert!(set.find_by_alert_id("1").is_none());
    }

    #[test]
    fn test_find_uses_creation_order() {
        let now = Instant::now();
        let mut set = IncidentSet::new();
        let first = set.insert(incident("1", &["a"], now));
        set.insert(incident("2", &["a"], now));

        let found = set.find(|i| i.locations.contains(&"a".to_string()));
        assert_eq!(found.map(|(id, _)| id), Some(first));
    }

    #[test]
    fn test_evict_idle() {
        let start = Instant::now();
        let mut set = IncidentSet::new();
        set.insert(incident("1", &["a"], start));
        let fresh = set.insert(incident("2", &["b"], start + Duration::from_secs(50)));

        let removed = set.evict_idle(start + Duration::from_secs(60), Duration::from_secs(30));
        assert_eq!(removed, 1);
        assert_eq!(set.len(), 1);
        assert!(set.get(fresh).is_some());
    }

    #[test]
    fn test_map_reference_empty() {
        assert!(MapReference::empty().is_empty());
        assert!(!MapReference::new("https://example.com/map.png").is_empty());
    }
}
