//! Local stand-in for the alert feed.
//!
//! Serves the content of a JSON file at `/` and reloads it whenever the file
//! changes, so alert scenarios can be replayed by editing the file while the
//! relay polls it.

mod error;
mod feed;
mod watcher;

pub use error::ServerError;
pub use feed::{load_feed, router, FeedState};
pub use watcher::FeedWatcher;
