//! Core types and decision logic for the alert relay.
//!
//! This crate holds the only stateful part of the relay: the incident
//! correlator. It defines:
//!
//! - [`Alert`] - A raw record received from the alert source
//! - [`Incident`] / [`IncidentSet`] - The merged view behind one notification
//! - [`Correlator`] - Matches alerts to incidents and decides create/edit/no-op
//! - [`AlertSource`], [`Geocoder`], [`MapRenderer`], [`NotificationChannel`] -
//!   The traits implemented by the I/O crates
//!
//! # Example
//!
//! ```rust,ignore
//! use incident_core::{Correlator, IncidentSet};
//!
//! let correlator = Correlator::new(renderer, channel);
//! let mut incidents = IncidentSet::new();
//!
//! let alerts = source.fetch().await?;
//! let outcome = correlator.process(alerts, &mut incidents).await?;
//! println!("cycle finished: {}", outcome);
//! ```

mod alert;
mod correlator;
mod error;
mod format;
mod incident;
pub mod locations;
mod trait_def;

pub use alert::{Alert, Coordinates};
pub use correlator::{select_candidate, Correlator, Outcome};
pub use error::{ChannelError, CorrelatorError, GeocodeError, MapError, SourceError};
pub use format::{escape_html, format_alert_message, icon_for_title, DEFAULT_ICON};
pub use incident::{Incident, IncidentId, IncidentSet, MapReference, MessageHandle};
pub use locations::{is_subset, union_preserving_order};
pub use trait_def::{AlertSource, Geocoder, MapRenderer, NotificationChannel};

// Re-export async_trait for implementors
pub use async_trait::async_trait;
