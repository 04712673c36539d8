//! Poll loop driving the correlator.

use std::time::Duration;

use incident_core::{
    AlertSource, Correlator, IncidentSet, MapRenderer, NotificationChannel, Outcome,
};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::PollError;
use crate::filter::LocationFilter;

/// Capacity of the error sink. Errors beyond this are logged and dropped.
const ERROR_BUFFER: usize = 64;

/// Fetches alerts on a fixed period and folds them into the incident set.
pub struct Poller<S, M, C> {
    source: S,
    correlator: Correlator<M, C>,
    incidents: IncidentSet,
    filter: LocationFilter,
    incident_ttl: Option<Duration>,
}

impl<S, M, C> Poller<S, M, C>
where
    S: AlertSource,
    M: MapRenderer,
    C: NotificationChannel,
{
    pub fn new(source: S, correlator: Correlator<M, C>) -> Self {
        Self {
            source,
            correlator,
            incidents: IncidentSet::new(),
            filter: LocationFilter::disabled(),
            incident_ttl: None,
        }
    }

    pub fn with_filter(mut self, filter: LocationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Forget incidents not updated for `ttl`. `None` keeps them forever.
    pub fn with_incident_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.incident_ttl = ttl;
        self
    }

    pub fn incidents(&self) -> &IncidentSet {
        &self.incidents
    }

    pub fn correlator(&self) -> &Correlator<M, C> {
        &self.correlator
    }

    /// Run one fetch-filter-correlate cycle.
    pub async fn run_cycle(&mut self) -> Result<Outcome, PollError> {
        if let Some(ttl) = self.incident_ttl {
            let evicted = self.incidents.evict_idle(Instant::now(), ttl);
            if evicted > 0 {
                info!(evicted, remaining = self.incidents.len(), "Expired idle incidents");
            }
        }

        let alerts = self.source.fetch().await.map_err(|e| {
            warn!(source = self.source.name(), "Failed to fetch alerts: {}", e);
            e
        })?;

        let fetched = alerts.len();
        let alerts = self.filter.apply(alerts);
        if alerts.len() != fetched {
            debug!("Location filter kept {} of {} alerts", alerts.len(), fetched);
        }

        let outcome = self.correlator.process(alerts, &mut self.incidents).await?;
        Ok(outcome)
    }
}

impl<S, M, C> Poller<S, M, C>
where
    S: AlertSource + 'static,
    M: MapRenderer + 'static,
    C: NotificationChannel + 'static,
{
    /// Run cycles every `period` on a background task.
    ///
    /// The first cycle starts immediately. A cycle that overruns delays the
    /// next one; cycles never overlap. Cycle errors are sent on the returned
    /// receiver. The task stops once the receiver is dropped.
    pub fn spawn(mut self, period: Duration) -> (JoinHandle<()>, mpsc::Receiver<PollError>) {
        let (errors_tx, errors_rx) = mpsc::channel(ERROR_BUFFER);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!("Polling {} every {:?}", self.source.name(), period);

            loop {
                ticker.tick().await;

                match self.run_cycle().await {
                    Ok(outcome) => {
                        debug!(%outcome, incidents = self.incidents.len(), "Poll cycle complete");
                    }
                    Err(e) => match errors_tx.try_send(e) {
                        Ok(()) => {}
                        Err(TrySendError::Full(e)) => {
                            warn!("Error sink full, dropping error: {}", e);
                        }
                        Err(TrySendError::Closed(_)) => {
                            info!("Error receiver dropped, stopping poller");
                            break;
                        }
                    },
                }

                if errors_tx.is_closed() {
                    info!("Error receiver dropped, stopping poller");
                    break;
                }
            }
        });

        (handle, errors_rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_core::Alert;
    use mock_notifier::{FixedMapRenderer, Operation, RecordingChannel, ScriptedSource};

    type TestPoller = Poller<ScriptedSource, FixedMapRenderer, RecordingChannel>;

    fn poller(source: ScriptedSource, channel: RecordingChannel) -> TestPoller {
        Poller::new(source, Correlator::new(FixedMapRenderer::new(), channel))
    }

    #[tokio::test]
    async fn test_cycle_creates_incident() {
        let source = ScriptedSource::new();
        let channel = RecordingChannel::new();
        source.push_batch(vec![Alert::new("1", "ירי רקטות וטילים", ["שדרות"])]).await;

        let mut poller = poller(source, channel.clone());
        let outcome = poller.run_cycle().await.unwrap();

        assert!(matches!(outcome, Outcome::Created { .. }));
        assert_eq!(poller.incidents().len(), 1);
        assert_eq!(channel.count(Operation::Create), 1);
    }

    #[tokio::test]
    async fn test_source_error_leaves_state() {
        let source = ScriptedSource::new();
        source.push_error("connection reset").await;

        let mut poller = poller(source, RecordingChannel::new());
        let err = poller.run_cycle().await.unwrap_err();

        assert!(matches!(err, PollError::Source(_)));
        assert!(poller.incidents().is_empty());
    }

    #[tokio::test]
    async fn test_filter_drops_unrelated_alerts() {
        let source = ScriptedSource::new();
        let channel = RecordingChannel::new();
        source
            .push_batch(vec![
                Alert::new("1", "t", ["חולון"]),
                Alert::new("2", "t", ["חיפה"]),
            ])
            .await;

        let mut poller = poller(source, channel.clone()).with_filter(LocationFilter::new("חולון"));
        let outcome = poller.run_cycle().await.unwrap();

        // "2" is the highest id but is filtered out
        assert_eq!(
            outcome,
            Outcome::Created {
                incident: poller.incidents().iter().next().unwrap().0,
                alert_id: "1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_filter_can_empty_the_batch() {
        let source = ScriptedSource::new();
        source.push_batch(vec![Alert::new("1", "t", ["חיפה"])]).await;

        let mut poller = poller(source, RecordingChannel::new()).with_filter(LocationFilter::new("אילת"));
        assert_eq!(poller.run_cycle().await.unwrap(), Outcome::Idle);
    }

    #[tokio::test]
    async fn test_channel_failure_is_retried_next_cycle() {
        let source = ScriptedSource::new();
        let channel = RecordingChannel::new();
        let alert = Alert::new("1", "t", ["שדרות"]);
        source.push_batch(vec![alert.clone()]).await;
        source.push_batch(vec![alert]).await;
        channel.fail_next(1);

        let mut poller = poller(source, channel.clone());
        assert!(matches!(poller.run_cycle().await, Err(PollError::Correlator(_))));
        assert!(poller.incidents().is_empty());

        assert!(matches!(poller.run_cycle().await.unwrap(), Outcome::Created { .. }));
        assert_eq!(channel.attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_incidents_expire() {
        let source = ScriptedSource::new();
        source.push_batch(vec![Alert::new("1", "t", ["שדרות"])]).await;

        let mut poller = poller(source, RecordingChannel::new())
            .with_incident_ttl(Some(Duration::from_secs(60)));
        poller.run_cycle().await.unwrap();
        assert_eq!(poller.incidents().len(), 1);

        tokio::time::advance(Duration::from_secs(30)).await;
        poller.run_cycle().await.unwrap();
        assert_eq!(poller.incidents().len(), 1);

        tokio::time::advance(Duration::from_secs(31)).await;
        poller.run_cycle().await.unwrap();
        assert!(poller.incidents().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_reports_errors_and_keeps_polling() {
        let source = ScriptedSource::new();
        let channel = RecordingChannel::new();
        source.push_error("timeout").await;
        source.push_batch(vec![Alert::new("1", "t", ["שדרות"])]).await;

        let (handle, mut errors) =
            poller(source.clone(), channel.clone()).spawn(Duration::from_secs(5));

        let err = errors.recv().await.unwrap();
        assert!(matches!(err, PollError::Source(_)));

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(channel.count(Operation::Create), 1);
        assert!(source.fetches().await >= 2);

        drop(errors);
        tokio::time::timeout(Duration::from_secs(30), handle)
            .await
            .expect("poller should stop once the receiver is dropped")
            .unwrap();
    }
}
