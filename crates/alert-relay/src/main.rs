use std::sync::Arc;

use alert_relay::{Poller, RelayConfig};
use incident_core::{Correlator, NotificationChannel};
use mock_notifier::LoggingChannel;
use oref_client::OrefClient;
use static_maps::{CachingGeocoder, GoogleGeocoder, StaticMapRenderer};
use telegram_client::TelegramClient;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env()?;
    info!(
        endpoint = %config.alerts_endpoint,
        interval = ?config.poll_interval,
        dry_run = config.dry_run,
        "Starting alert relay"
    );

    let source = OrefClient::new(config.source_config())?;

    let maps_config = config.maps_config();
    let geocoder = CachingGeocoder::new(GoogleGeocoder::new(maps_config.clone())?);
    let renderer = StaticMapRenderer::new(geocoder, maps_config);

    let channel: Arc<dyn NotificationChannel> = if config.dry_run {
        warn!("DRY_RUN is set, notifications will only be logged");
        Arc::new(LoggingChannel::new())
    } else {
        Arc::new(TelegramClient::new(config.telegram_config()?)?)
    };

    let filter = config.location_filter();
    if filter.is_enabled() {
        info!("Only relaying alerts mentioning {:?}", config.location_filter);
    }

    let poller = Poller::new(source, Correlator::new(renderer, channel))
        .with_filter(filter)
        .with_incident_ttl(config.incident_ttl);

    info!("Starting poller with channel: {}", poller.correlator().channel().name());
    let (handle, mut errors) = poller.spawn(config.poll_interval);

    loop {
        tokio::select! {
            Some(err) = errors.recv() => {
                error!("Poll cycle failed: {}", err);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, shutting down");
                break;
            }
        }
    }

    handle.abort();
    Ok(())
}
