use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::ServerError;

/// Body currently served, shared between the handler and the watcher.
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    body: Arc<RwLock<String>>,
}

impl FeedState {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Arc::new(RwLock::new(body.into())),
        }
    }

    pub async fn body(&self) -> String {
        self.body.read().await.clone()
    }

    /// Swap in a new body. Returns whether it differed from the old one.
    pub async fn replace(&self, body: String) -> bool {
        let mut current = self.body.write().await;
        if *current == body {
            return false;
        }
        *current = body;
        true
    }
}

/// Read an alert file.
///
/// A blank file is a quiet feed and yields an empty body. Anything else must
/// be valid JSON and is served as written.
pub async fn load_feed(path: &Path) -> Result<String, ServerError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ServerError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let content = content.trim_start_matches('\u{feff}').trim();
    if content.is_empty() {
        return Ok(String::new());
    }

    serde_json::from_str::<Value>(content).map_err(|source| ServerError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content.to_string())
}

pub fn router(state: FeedState) -> Router {
    Router::new().route("/", get(serve_alerts)).with_state(state)
}

async fn serve_alerts(State(state): State<FeedState>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        state.body().await,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_with(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_feed() {
        let file = file_with("\u{feff}{\"id\":\"1\",\"data\":[\"שדרות\"]}\n");
        let body = load_feed(file.path()).await.unwrap();
        assert_eq!(body, "{\"id\":\"1\",\"data\":[\"שדרות\"]}");
    }

    #[tokio::test]
    async fn test_blank_file_is_quiet() {
        let file = file_with("  \n");
        assert_eq!(load_feed(file.path()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let file = file_with("{\"id\":");
        assert!(matches!(
            load_feed(file.path()).await,
            Err(ServerError::Json { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_feed(Path::new("/nonexistent/alerts.json")).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/alerts.json"));
    }

    #[tokio::test]
    async fn test_replace_reports_change() {
        let state = FeedState::new("[]");
        assert!(!state.replace("[]".to_string()).await);
        assert!(state.replace("".to_string()).await);
        assert_eq!(state.body().await, "");
    }
}
