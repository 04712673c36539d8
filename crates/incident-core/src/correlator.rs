//! Incident correlation and update decisions.
//!
//! One call to [`Correlator::process`] handles one poll batch:
//!
//! ```text
//! batch ──► pick highest id ──► match incident? ──no──► render + create
//!                                    │
//!                                   yes
//!                                    ▼
//!                      union locations, re-render, compare
//!                        │            │              │
//!                    map changed  text changed   nothing changed
//!                        ▼            ▼              ▼
//!                   edit_media   edit_caption      no call
//! ```
//!
//! Incident state is written only after the external call succeeded.

use std::fmt;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::alert::Alert;
use crate::error::CorrelatorError;
use crate::format::{format_alert_message, icon_for_title};
use crate::incident::{Incident, IncidentId, IncidentSet};
use crate::locations::{contains_either, union_preserving_order};
use crate::trait_def::{MapRenderer, NotificationChannel};

/// What a correlation cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The batch was empty.
    Idle,
    /// The candidate alert could not be used.
    Skipped { alert_id: String, reason: String },
    /// A new notification was sent.
    Created { incident: IncidentId, alert_id: String },
    /// The map and caption of an existing notification were replaced.
    MediaEdited { incident: IncidentId, alert_id: String },
    /// Only the caption of an existing notification was replaced.
    CaptionEdited { incident: IncidentId, alert_id: String },
    /// The alert matched an incident whose notification is already current.
    Unchanged { incident: IncidentId, alert_id: String },
}

impl Outcome {
    /// Whether the cycle made an external call that changed something.
    pub fn is_delivery(&self) -> bool {
        matches!(
            self,
            Outcome::Created { .. } | Outcome::MediaEdited { .. } | Outcome::CaptionEdited { .. }
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Idle => write!(f, "no alerts"),
            Outcome::Skipped { alert_id, reason } => {
                write!(f, "skipped alert {}: {}", alert_id, reason)
            }
            Outcome::Created { incident, alert_id } => {
                write!(f, "created {} from alert {}", incident, alert_id)
            }
            Outcome::MediaEdited { incident, alert_id } => {
                write!(f, "updated map of {} with alert {}", incident, alert_id)
            }
            Outcome::CaptionEdited { incident, alert_id } => {
                write!(f, "updated caption of {} with alert {}", incident, alert_id)
            }
            Outcome::Unchanged { incident, alert_id } => {
                write!(f, "{} already current for alert {}", incident, alert_id)
            }
        }
    }
}

/// Pick the alert with the greatest id. Ties go to whichever comes last.
pub fn select_candidate(alerts: Vec<Alert>) -> Option<Alert> {
    alerts.into_iter().max_by(|a, b| a.id.cmp(&b.id))
}

/// Decides how each poll batch changes the set of notifications.
pub struct Correlator<M, C> {
    renderer: M,
    channel: C,
}

impl<M: MapRenderer, C: NotificationChannel> Correlator<M, C> {
    pub fn new(renderer: M, channel: C) -> Self {
        Self { renderer, channel }
    }

    pub fn renderer(&self) -> &M {
        &self.renderer
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Fold one poll batch into `incidents`.
    ///
    /// Only the highest-id alert of the batch is considered. On error the
    /// incident set is exactly as it was before the call.
    pub async fn process(
        &self,
        alerts: Vec<Alert>,
        incidents: &mut IncidentSet,
    ) -> Result<Outcome, CorrelatorError> {
        let batch_size = alerts.len();
        let Some(candidate) = select_candidate(alerts) else {
            debug!("No alerts to process");
            return Ok(Outcome::Idle);
        };

        info!(
            "Processing latest alert ID: {} with locations: {:?} (batch of {})",
            candidate.id, candidate.locations, batch_size
        );

        if candidate.locations.is_empty() {
            warn!(alert_id = %candidate.id, "Alert has no locations, skipping");
            return Ok(Outcome::Skipped {
                alert_id: candidate.id,
                reason: "no locations".to_string(),
            });
        }

        let matched = incidents
            .find(|incident| contains_either(&incident.locations, &candidate.locations))
            .map(|(id, incident)| (id, incident.clone()));

        match matched {
            Some((id, existing)) => {
                info!(
                    "Found existing {} (last alert {}) matching location criteria",
                    id, existing.latest_alert_id
                );
                self.merge(id, existing, candidate, incidents).await
            }
            None => self.create(candidate, incidents).await,
        }
    }

    async fn create(
        &self,
        candidate: Alert,
        incidents: &mut IncidentSet,
    ) -> Result<Outcome, CorrelatorError> {
        let locations = union_preserving_order::<&str, _>(&[], &candidate.locations);
        let content = render_content(&candidate, &locations);

        let map = self.renderer.render(&locations).await.map_err(|e| {
            warn!("Failed to render map for new alert {}: {}", candidate.id, e);
            e
        })?;

        info!("Creating new message with map via {}", self.channel.name());
        let handle = self.channel.create(&content, &map).await.map_err(|e| {
            warn!("Failed to send new message: {}", e);
            e
        })?;

        let now = Instant::now();
        let id = incidents.insert(Incident {
            latest_alert_id: candidate.id.clone(),
            message_handle: handle,
            locations,
            rendered_content: content,
            map_reference: map,
            created_at: now,
            updated_at: now,
        });

        info!(incident = %id, alert_id = %candidate.id, "Incident created");
        Ok(Outcome::Created {
            incident: id,
            alert_id: candidate.id,
        })
    }

    async fn merge(
        &self,
        id: IncidentId,
        existing: Incident,
        candidate: Alert,
        incidents: &mut IncidentSet,
    ) -> Result<Outcome, CorrelatorError> {
        let locations = union_preserving_order(&existing.locations, &candidate.locations);
        let content = render_content(&candidate, &locations);

        let rendered = self.renderer.render(&locations).await.map_err(|e| {
            warn!("Failed to render map for {}: {}", id, e);
            e
        })?;

        // A delivered map is never replaced by an empty one
        let map = if rendered.is_empty() && !existing.map_reference.is_empty() {
            warn!("Map for {} came back empty, keeping the delivered one", id);
            existing.map_reference.clone()
        } else {
            rendered
        };

        let map_changed = map != existing.map_reference;
        let content_changed = content != existing.rendered_content;

        if !map_changed && !content_changed {
            debug!("No changes detected - skipping update");
            return Ok(Outcome::Unchanged {
                incident: id,
                alert_id: candidate.id,
            });
        }

        let handle = &existing.message_handle;
        let (outcome, handle) = if map_changed {
            info!("Updating map with all locations ({} total)", locations.len());
            let delivered = self
                .channel
                .edit_media(handle, &map, &content)
                .await
                .map_err(|e| {
                    warn!("Failed to update map: {}", e);
                    e
                })?;
            if &delivered != handle {
                info!("Message {} replaced by {}", handle, delivered);
            }
            let outcome = Outcome::MediaEdited {
                incident: id,
                alert_id: candidate.id.clone(),
            };
            (outcome, delivered)
        } else {
            info!("Updating caption of message {}", handle);
            self.channel
                .edit_caption(handle, &content)
                .await
                .map_err(|e| {
                    warn!("Failed to update caption: {}", e);
                    e
                })?;
            let outcome = Outcome::CaptionEdited {
                incident: id,
                alert_id: candidate.id.clone(),
            };
            (outcome, handle.clone())
        };

        if let Some(incident) = incidents.get_mut(id) {
            incident.latest_alert_id = candidate.id;
            incident.message_handle = handle;
            incident.locations = locations;
            incident.rendered_content = content;
            incident.map_reference = map;
            incident.updated_at = Instant::now();
        }

        Ok(outcome)
    }
}

fn render_content(alert: &Alert, locations: &[String]) -> String {
    let icon = icon_for_title(&alert.title);
    format_alert_message(icon, &alert.title, locations, &alert.description)
}
