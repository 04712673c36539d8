//! Client for the Home Front Command alert feed.
//!
//! The feed is a JSON document that is empty between alerts and holds either
//! a single alert object or an array of them while alerts are active.
//! [`OrefClient`] implements [`incident_core::AlertSource`].

pub mod client;
pub mod config;
pub mod error;
pub mod parse;

pub use client::OrefClient;
pub use config::{SourceConfig, DEFAULT_ALERTS_ENDPOINT};
pub use error::OrefError;
pub use parse::parse_alerts;
