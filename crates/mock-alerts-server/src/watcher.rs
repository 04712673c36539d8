//! Reload the alert file when it changes on disk.

use std::path::{Path, PathBuf};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::ServerError;
use crate::feed::{load_feed, FeedState};

/// Keeps `state` in sync with a file until dropped.
pub struct FeedWatcher {
    _watcher: RecommendedWatcher,
    handle: JoinHandle<()>,
}

impl FeedWatcher {
    /// Start watching `path`. Must be called inside a tokio runtime.
    ///
    /// The parent directory is watched so files replaced by rename (as most
    /// editors do) are still picked up. A file that fails to load leaves the
    /// previous body in place.
    pub fn start(path: impl Into<PathBuf>, state: FeedState) -> Result<Self, ServerError> {
        let path = path.into();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                if let Ok(event) = res {
                    let _ = tx.send(event);
                }
            },
            notify::Config::default(),
        )?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        let file_name = path.file_name().map(|name| name.to_os_string());
        let handle = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    continue;
                }
                if !event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == file_name.as_deref())
                {
                    continue;
                }

                match load_feed(&path).await {
                    Ok(body) => {
                        if state.replace(body).await {
                            info!(path = %path.display(), "Reloaded alert file");
                        }
                    }
                    Err(e) => warn!("Keeping previous alerts: {}", e),
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            handle,
        })
    }
}

impl Drop for FeedWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
