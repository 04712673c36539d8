//! Recording channel - keeps every call for later assertions.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use incident_core::{ChannelError, MapReference, MessageHandle, NotificationChannel};

/// The three channel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    EditMedia,
    EditCaption,
}

/// One successful call made to a [`RecordingChannel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelCall {
    Create {
        text: String,
        media: MapReference,
    },
    EditMedia {
        handle: MessageHandle,
        media: MapReference,
        text: String,
    },
    EditCaption {
        handle: MessageHandle,
        text: String,
    },
}

impl ChannelCall {
    pub fn operation(&self) -> Operation {
        match self {
            ChannelCall::Create { .. } => Operation::Create,
            ChannelCall::EditMedia { .. } => Operation::EditMedia,
            ChannelCall::EditCaption { .. } => Operation::EditCaption,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<ChannelCall>,
    attempts: usize,
    fail_next: usize,
    failing: HashSet<Operation>,
    next_id: u64,
}

/// A channel that records calls instead of sending anything.
///
/// Clones share the same record, so a test can keep one clone and hand the
/// other to the correlator. Failed calls are counted in [`attempts`] but not
/// recorded in [`calls`].
///
/// [`attempts`]: RecordingChannel::attempts
/// [`calls`]: RecordingChannel::calls
#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    state: Arc<Mutex<State>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the next `n` calls, whatever the operation.
    pub fn fail_next(&self, n: usize) {
        self.lock().fail_next = n;
    }

    /// Reject every call of `operation` until [`recover`](Self::recover).
    pub fn fail_operation(&self, operation: Operation) {
        self.lock().failing.insert(operation);
    }

    /// Stop failing.
    pub fn recover(&self) {
        let mut state = self.lock();
        state.fail_next = 0;
        state.failing.clear();
    }

    /// Successful calls, in order.
    pub fn calls(&self) -> Vec<ChannelCall> {
        self.lock().calls.clone()
    }

    /// Successful calls of one operation.
    pub fn count(&self, operation: Operation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Every call made, successful or not.
    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, operation: Operation, call: ChannelCall) -> Result<u64, ChannelError> {
        let mut state = self.lock();
        state.attempts += 1;

        if state.fail_next > 0 || state.failing.contains(&operation) {
            state.fail_next = state.fail_next.saturating_sub(1);
            return Err(ChannelError::Rejected {
                status: 500,
                body: format!("{:?} rejected by RecordingChannel", operation),
            });
        }

        state.calls.push(call);
        state.next_id += 1;
        Ok(state.next_id)
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn create(&self, text: &str, media: &MapReference) -> Result<MessageHandle, ChannelError> {
        let call = ChannelCall::Create {
            text: text.to_string(),
            media: media.clone(),
        };
        let id = self.record(Operation::Create, call)?;

        if media.is_empty() {
            Ok(MessageHandle::text(id.to_string()))
        } else {
            Ok(MessageHandle::media(id.to_string()))
        }
    }

    async fn edit_media(
        &self,
        handle: &MessageHandle,
        media: &MapReference,
        text: &str,
    ) -> Result<MessageHandle, ChannelError> {
        let call = ChannelCall::EditMedia {
            handle: handle.clone(),
            media: media.clone(),
            text: text.to_string(),
        };
        let id = self.record(Operation::EditMedia, call)?;

        // A text message is replaced by a new photo message
        if handle.has_media() || media.is_empty() {
            Ok(handle.clone())
        } else {
            Ok(MessageHandle::media(id.to_string()))
        }
    }

    async fn edit_caption(&self, handle: &MessageHandle, text: &str) -> Result<(), ChannelError> {
        let call = ChannelCall::EditCaption {
            handle: handle.clone(),
            text: text.to_string(),
        };
        self.record(Operation::EditCaption, call).map(|_| ())
    }

    fn name(&self) -> &str {
        "RecordingChannel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let channel = RecordingChannel::new();
        let map = MapReference::new("map");

        let handle = channel.create("a", &map).await.unwrap();
        channel.edit_caption(&handle, "b").await.unwrap();

        let calls = channel.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].operation(), Operation::Create);
        assert_eq!(
            calls[1],
            ChannelCall::EditCaption {
                handle,
                text: "b".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fail_next() {
        let channel = RecordingChannel::new();
        channel.fail_next(1);

        assert!(channel.create("a", &MapReference::empty()).await.is_err());
        assert!(channel.create("a", &MapReference::empty()).await.is_ok());
        assert_eq!(channel.attempts(), 2);
        assert_eq!(channel.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_fail_operation_until_recover() {
        let channel = RecordingChannel::new();
        let handle = channel.create("a", &MapReference::new("m")).await.unwrap();
        channel.fail_operation(Operation::EditMedia);

        assert!(channel.edit_media(&handle, &MapReference::new("n"), "b").await.is_err());
        assert!(channel.edit_caption(&handle, "b").await.is_ok());

        channel.recover();
        assert!(channel.edit_media(&handle, &MapReference::new("n"), "b").await.is_ok());
        assert_eq!(channel.count(Operation::EditMedia), 1);
    }

    #[tokio::test]
    async fn test_media_edit_replaces_text_message() {
        let channel = RecordingChannel::new();
        let text = channel.create("a", &MapReference::empty()).await.unwrap();
        assert!(!text.has_media());

        let photo = channel.edit_media(&text, &MapReference::new("m"), "b").await.unwrap();
        assert!(photo.has_media());
        assert_ne!(photo, text);

        let same = channel.edit_media(&photo, &MapReference::new("n"), "c").await.unwrap();
        assert_eq!(same, photo);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let channel = RecordingChannel::new();
        let clone = channel.clone();
        clone.create("a", &MapReference::empty()).await.unwrap();
        assert_eq!(channel.count(Operation::Create), 1);
    }
}
