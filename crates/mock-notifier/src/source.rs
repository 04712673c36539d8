//! Scripted alert source.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use incident_core::{Alert, AlertSource, SourceError};
use tokio::sync::Mutex;

/// One scripted poll result.
type Poll = Result<Vec<Alert>, String>;

/// Returns queued batches in order, then empty batches forever.
///
/// `Err` entries are returned as [`SourceError::Transport`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    polls: Arc<Mutex<VecDeque<Poll>>>,
    fetches: Arc<Mutex<usize>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful batch.
    pub async fn push_batch(&self, alerts: Vec<Alert>) {
        self.polls.lock().await.push_back(Ok(alerts));
    }

    /// Queue a failed poll.
    pub async fn push_error(&self, message: impl Into<String>) {
        self.polls.lock().await.push_back(Err(message.into()));
    }

    /// Number of fetches served so far.
    pub async fn fetches(&self) -> usize {
        *self.fetches.lock().await
    }
}

#[async_trait]
impl AlertSource for ScriptedSource {
    async fn fetch(&self) -> Result<Vec<Alert>, SourceError> {
        *self.fetches.lock().await += 1;
        match self.polls.lock().await.pop_front() {
            Some(Ok(alerts)) => Ok(alerts),
            Some(Err(message)) => Err(SourceError::Transport(message)),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &str {
        "ScriptedSource"
    }
}
