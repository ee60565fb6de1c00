//! The Poller loop.
//!
//! # Responsibilities
//! - Fire a tick every period, starting immediately
//! - Own the invocation counter
//! - Apply the overlap policy to the previous in-flight request

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time;

use crate::config::validation::validate_config;
use crate::config::{ConfigError, OverlapPolicy, PollerConfig};
use crate::observability::metrics;
use crate::poller::request::{RequestJob, RequestTarget};
use crate::poller::sink::OutputSink;
use crate::poller::types::{TickOutcome, TickReport};

/// Most recently issued request.
struct InFlight {
    invocation: u64,
    handle: JoinHandle<()>,
    cancel: oneshot::Sender<()>,
}

pub struct Poller {
    client: Client,
    target: Arc<RequestTarget>,
    interval_ms: u64,
    timeout_ms: Option<u64>,
    overlap: OverlapPolicy,
    sink: Arc<dyn OutputSink>,
    reports: Option<mpsc::UnboundedSender<TickReport>>,
    invocations: u64,
    in_flight: Option<InFlight>,
}

impl Poller {
    /// Build a poller from a configuration. The counter starts at 0.
    pub fn new(config: &PollerConfig, sink: Arc<dyn OutputSink>) -> Result<Self, ConfigError> {
        validate_config(config).map_err(ConfigError::Validation)?;

        let target = RequestTarget::try_from(&config.target)?;
        let client = Client::builder().no_proxy().build()?;

        Ok(Self {
            client,
            target: Arc::new(target),
            interval_ms: config.schedule.interval_ms,
            timeout_ms: config.schedule.timeout_ms,
            overlap: config.schedule.overlap,
            sink,
            reports: None,
            invocations: 0,
            in_flight: None,
        })
    }

    /// Send one [`TickReport`] per invocation to `reports`.
    pub fn with_reports(mut self, reports: mpsc::UnboundedSender<TickReport>) -> Self {
        self.reports = Some(reports);
        self
    }

    /// Number of ticks fired so far.
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Fire one tick and return its invocation number.
    ///
    /// Returns as soon as the request task is spawned. Must be called from
    /// within a Tokio runtime.
    pub fn tick(&mut self) -> u64 {
        self.invocations += 1;
        let invocation = self.invocations;
        tracing::info!(invocation, "Tick");
        metrics::record_tick();

        if let Some(previous) = self.in_flight.take() {
            if !previous.handle.is_finished() {
                match self.overlap {
                    OverlapPolicy::Allow => {}
                    OverlapPolicy::Skip => {
                        tracing::debug!(
                            invocation,
                            pending = previous.invocation,
                            "Previous request still in flight, skipping"
                        );
                        self.in_flight = Some(previous);
                        self.report(invocation, TickOutcome::Skipped);
                        return invocation;
                    }
                    OverlapPolicy::Cancel => {
                        let _ = previous.cancel.send(());
                    }
                }
            }
        }

        let (cancel, cancelled) = oneshot::channel();
        let job = RequestJob {
            invocation,
            client: self.client.clone(),
            target: self.target.clone(),
            timeout_ms: self.timeout_ms,
            sink: self.sink.clone(),
            reports: self.reports.clone(),
        };
        let handle = tokio::spawn(job.run(cancelled));

        self.in_flight = Some(InFlight {
            invocation,
            handle,
            cancel,
        });
        invocation
    }

    /// Tick every period until `shutdown` fires. Returns the number of ticks fired.
    ///
    /// The first tick is immediate. The schedule is anchored to tick starts, so
    /// a slow or hung request never delays the next tick.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> u64 {
        tracing::info!(
            url = %self.target.url,
            interval_ms = self.interval_ms,
            overlap = ?self.overlap,
            "Poller starting"
        );

        let mut ticker = time::interval(Duration::from_millis(self.interval_ms));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick();
                }
                _ = shutdown.recv() => {
                    tracing::info!(invocations = self.invocations, "Poller received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        self.invocations
    }

    fn report(&self, invocation: u64, outcome: TickOutcome) {
        metrics::record_outcome(&outcome);
        if let Some(reports) = &self.reports {
            let _ = reports.send(TickReport { invocation, outcome });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::sink::MemorySink;

    fn unreachable_config() -> PollerConfig {
        let mut config = PollerConfig::default();
        // Port 9 (discard) on loopback is closed on test machines.
        config.target.host = "127.0.0.1".into();
        config.target.port = 9;
        config
    }

    #[tokio::test]
    async fn test_counter_starts_at_one_and_increments() {
        let mut poller = Poller::new(&unreachable_config(), Arc::new(MemorySink::new())).unwrap();
        assert_eq!(poller.invocations(), 0);

        let sequence: Vec<u64> = (0..5).map(|_| poller.tick()).collect();
        assert_eq!(sequence, vec![1, 2, 3, 4, 5]);
        assert_eq!(poller.invocations(), 5);
    }

    #[tokio::test]
    async fn test_new_poller_resets_counter() {
        let config = unreachable_config();
        let mut first = Poller::new(&config, Arc::new(MemorySink::new())).unwrap();
        first.tick();
        first.tick();

        let mut second = Poller::new(&config, Arc::new(MemorySink::new())).unwrap();
        assert_eq!(second.tick(), 1);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = PollerConfig::default();
        config.schedule.interval_ms = 0;
        let result = Poller::new(&config, Arc::new(MemorySink::new()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut config = unreachable_config();
        config.schedule.interval_ms = 20;
        let poller = Poller::new(&config, Arc::new(MemorySink::new())).unwrap();

        let (tx, rx) = broadcast::channel(1);
        let run = tokio::spawn(poller.run(rx));
        time::sleep(Duration::from_millis(70)).await;
        tx.send(()).unwrap();

        let ticks = time::timeout(Duration::from_secs(2), run).await.unwrap().unwrap();
        assert!(ticks >= 1, "first tick must fire immediately, got {}", ticks);
    }
}
