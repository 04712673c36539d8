//! Alert relay: polls an alert feed and keeps one channel post per incident.
//!
//! The [`Poller`] owns the incident state. Each cycle it fetches a batch from
//! an [`AlertSource`](incident_core::AlertSource), applies the
//! [`LocationFilter`], and hands the batch to the
//! [`Correlator`](incident_core::Correlator). Cycle errors go to an error
//! sink and never stop the loop.

pub mod config;
pub mod error;
pub mod filter;
pub mod poller;

pub use config::{parse_duration, ConfigError, RelayConfig};
pub use error::PollError;
pub use filter::LocationFilter;
pub use poller::Poller;
