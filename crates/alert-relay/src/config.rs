//! Configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::time::Duration;

use oref_client::{SourceConfig, DEFAULT_ALERTS_ENDPOINT};
use static_maps::config::DEFAULT_GEOCODE_CONCURRENCY;
use static_maps::MapsConfig;
use telegram_client::TelegramConfig;

use crate::filter::LocationFilter;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Relay configuration.
#[derive(Clone)]
pub struct RelayConfig {
    /// Alert feed URL.
    pub alerts_endpoint: String,
    /// Time between poll cycles.
    pub poll_interval: Duration,
    /// Timeout applied to every outbound request.
    pub http_timeout: Duration,
    /// Bot token. `None` only in dry-run mode.
    pub telegram_bot_token: Option<String>,
    /// Target chat. `None` only in dry-run mode.
    pub telegram_chat_id: Option<String>,
    /// Bot API base URL.
    pub telegram_api_url: String,
    /// Key for geocoding and static maps.
    pub google_maps_api_key: String,
    /// Appended to place names before geocoding.
    pub geocode_region: Option<String>,
    /// Language of geocoding results and map labels.
    pub map_language: String,
    /// Geocoding requests in flight at once.
    pub geocode_concurrency: usize,
    /// Alerts not mentioning this text are ignored. Empty = off.
    pub location_filter: String,
    /// Incidents untouched for this long are forgotten.
    pub incident_ttl: Option<Duration>,
    /// Log notifications instead of sending them.
    pub dry_run: bool,
}

impl RelayConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ALERTS_ENDPOINT` | Alert feed URL | oref `Alerts.json` |
    /// | `POLL_INTERVAL` | Poll period (`5s`, `500ms`, `2m`, `5`) | `5s` |
    /// | `HTTP_TIMEOUT` | Per-request timeout | `10s` |
    /// | `TELEGRAM_BOT_TOKEN` | Bot token | (required unless `DRY_RUN`) |
    /// | `TELEGRAM_CHAT_ID` | Target chat | (required unless `DRY_RUN`) |
    /// | `TELEGRAM_API_URL` | Bot API base URL | `https://api.telegram.org` |
    /// | `GOOGLE_MAPS_API_KEY` | Maps key | (required) |
    /// | `GEOCODE_REGION` | Geocoding suffix | `Israel` |
    /// | `MAP_LANGUAGE` | Map language | `he` |
    /// | `GEOCODE_CONCURRENCY` | Parallel geocoding requests | `4` |
    /// | `TARGET_LOCATION_FILTER` | Location filter | (off) |
    /// | `INCIDENT_TTL` | Incident expiry | (never) |
    /// | `DRY_RUN` | Log instead of send | `false` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let dry_run = match var("DRY_RUN") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidBool {
                var: "DRY_RUN",
                value,
            })?,
            None => false,
        };

        let poll_interval = duration_var(&var, "POLL_INTERVAL")?.unwrap_or(DEFAULT_POLL_INTERVAL);
        if poll_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("POLL_INTERVAL"));
        }

        let http_timeout = duration_var(&var, "HTTP_TIMEOUT")?.unwrap_or(DEFAULT_HTTP_TIMEOUT);
        if http_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("HTTP_TIMEOUT"));
        }

        let incident_ttl = duration_var(&var, "INCIDENT_TTL")?;
        if incident_ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(ConfigError::ZeroDuration("INCIDENT_TTL"));
        }

        let telegram_bot_token = var("TELEGRAM_BOT_TOKEN");
        let telegram_chat_id = var("TELEGRAM_CHAT_ID");
        if !dry_run {
            if telegram_bot_token.is_none() {
                return Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN"));
            }
            if telegram_chat_id.is_none() {
                return Err(ConfigError::Missing("TELEGRAM_CHAT_ID"));
            }
        }

        let google_maps_api_key =
            var("GOOGLE_MAPS_API_KEY").ok_or(ConfigError::Missing("GOOGLE_MAPS_API_KEY"))?;

        let geocode_concurrency = match var("GEOCODE_CONCURRENCY") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(0) => return Err(ConfigError::ZeroValue("GEOCODE_CONCURRENCY")),
                Ok(limit) => limit,
                Err(_) => {
                    return Err(ConfigError::InvalidNumber {
                        var: "GEOCODE_CONCURRENCY",
                        value,
                    })
                }
            },
            None => DEFAULT_GEOCODE_CONCURRENCY,
        };

        // An explicitly empty region disables the suffix.
        let geocode_region = match lookup("GEOCODE_REGION") {
            Some(region) if region.trim().is_empty() => None,
            Some(region) => Some(region.trim().to_string()),
            None => Some("Israel".to_string()),
        };

        Ok(Self {
            alerts_endpoint: var("ALERTS_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ALERTS_ENDPOINT.to_string()),
            poll_interval,
            http_timeout,
            telegram_bot_token,
            telegram_chat_id,
            telegram_api_url: var("TELEGRAM_API_URL")
                .unwrap_or_else(|| telegram_client::config::DEFAULT_API_URL.to_string()),
            google_maps_api_key,
            geocode_region,
            map_language: var("MAP_LANGUAGE").unwrap_or_else(|| "he".to_string()),
            geocode_concurrency,
            location_filter: var("TARGET_LOCATION_FILTER").unwrap_or_default(),
            incident_ttl,
            dry_run,
        })
    }

    pub fn source_config(&self) -> SourceConfig {
        SourceConfig::new(&self.alerts_endpoint).with_timeout(self.http_timeout)
    }

    pub fn maps_config(&self) -> MapsConfig {
        MapsConfig::new(&self.google_maps_api_key)
            .with_region(self.geocode_region.clone())
            .with_language(&self.map_language)
            .with_geocode_concurrency(self.geocode_concurrency)
            .with_timeout(self.http_timeout)
    }

    /// Bot API configuration. Fails when the credentials are absent.
    pub fn telegram_config(&self) -> Result<TelegramConfig, ConfigError> {
        let token = self
            .telegram_bot_token
            .as_deref()
            .ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;
        let chat_id = self
            .telegram_chat_id
            .as_deref()
            .ok_or(ConfigError::Missing("TELEGRAM_CHAT_ID"))?;

        Ok(TelegramConfig::new(token, chat_id)
            .with_api_url(&self.telegram_api_url)
            .with_timeout(self.http_timeout))
    }

    pub fn location_filter(&self) -> LocationFilter {
        LocationFilter::new(&self.location_filter)
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("alerts_endpoint", &self.alerts_endpoint)
            .field("poll_interval", &self.poll_interval)
            .field("http_timeout", &self.http_timeout)
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "<redacted>"),
            )
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("google_maps_api_key", &"<redacted>")
            .field("geocode_region", &self.geocode_region)
            .field("map_language", &self.map_language)
            .field("geocode_concurrency", &self.geocode_concurrency)
            .field("location_filter", &self.location_filter)
            .field("incident_ttl", &self.incident_ttl)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

/// Parse a duration like `5s`, `500ms`, `2m`, `1h` or bare seconds.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);
    let value: u64 = number.parse().ok()?;

    match unit.trim() {
        "" | "s" => Some(Duration::from_secs(value)),
        "ms" => Some(Duration::from_millis(value)),
        "m" => value.checked_mul(60).map(Duration::from_secs),
        "h" => value.checked_mul(3600).map(Duration::from_secs),
        _ => None,
    }
}

fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn duration_var<F>(var: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(value) => parse_duration(&value)
            .map(Some)
            .ok_or(ConfigError::InvalidDuration { var: key, value }),
        None => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("Invalid duration for {var}: {value:?}")]
    InvalidDuration { var: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("Invalid number for {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("Invalid boolean for {var}: {value:?}")]
    InvalidBool { var: &'static str, value: String },
}
