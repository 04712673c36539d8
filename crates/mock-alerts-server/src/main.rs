use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use mock_alerts_server::{load_feed, router, FeedState, FeedWatcher};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "mock-alerts-server")]
#[command(about = "Serve a local alert file in place of the live alert feed")]
struct Args {
    /// JSON file with the alerts to serve (reloaded on change)
    file: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let state = FeedState::new(load_feed(&args.file).await?);
    let _watcher = FeedWatcher::start(&args.file, state.clone())?;

    info!(addr = %args.addr, file = %args.file.display(), "Mock alerts server listening");
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
