//! Mock implementations of the relay's collaborator traits.
//!
//! This crate provides stand-ins for testing and dry runs:
//! - `RecordingChannel` - Records every notification call, can fail on demand
//! - `LoggingChannel` - Logs notifications instead of sending them
//! - `FixedMapRenderer` - Derives a map reference from the location list
//! - `FailingMapRenderer` - Always fails
//! - `ScriptedSource` - Returns queued alert batches
//!
//! # Example
//!
//! ```rust
//! use incident_core::{Alert, Correlator, IncidentSet};
//! use mock_notifier::{FixedMapRenderer, RecordingChannel};
//!
//! #[tokio::main]
//! async fn main() {
//!     let channel = RecordingChannel::new();
//!     let correlator = Correlator::new(FixedMapRenderer::new(), channel.clone());
//!     let mut incidents = IncidentSet::new();
//!
//!     let alert = Alert::new("1", "ירי רקטות וטילים", ["שדרות"]);
//!     correlator.process(vec![alert], &mut incidents).await.unwrap();
//!
//!     assert_eq!(channel.calls().len(), 1);
//! }
//! ```

mod logging;
mod recording;
mod renderer;
mod source;

// Re-export core types for convenience
pub use incident_core::{
    Alert, AlertSource, ChannelError, MapReference, MapRenderer, MessageHandle,
    NotificationChannel,
};

pub use logging::LoggingChannel;
pub use recording::{ChannelCall, Operation, RecordingChannel};
pub use renderer::{FailingMapRenderer, FixedMapRenderer};
pub use source::ScriptedSource;
