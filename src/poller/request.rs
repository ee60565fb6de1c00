//! One tick's request: send, stream the body to the sink, report.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Method};
use tokio::sync::{mpsc, oneshot};
use tokio::time;
use url::Url;

use crate::config::validation::ValidationError;
use crate::config::{ConfigError, TargetConfig};
use crate::observability::metrics;
use crate::poller::sink::OutputSink;
use crate::poller::types::{PollError, TickOutcome, TickReport};

/// Resolved request target.
#[derive(Debug, Clone)]
pub struct RequestTarget {
    pub method: Method,
    pub url: Url,
}

impl TryFrom<&TargetConfig> for RequestTarget {
    type Error = ConfigError;

    fn try_from(config: &TargetConfig) -> Result<Self, Self::Error> {
        let method = Method::from_bytes(config.method.as_bytes()).map_err(|_| {
            ConfigError::Validation(vec![ValidationError::InvalidMethod(config.method.clone())])
        })?;
        let url = config.url().map_err(|e| {
            ConfigError::Validation(vec![ValidationError::InvalidUrl(e.to_string())])
        })?;
        Ok(Self { method, url })
    }
}

/// Everything a spawned request task needs.
pub(crate) struct RequestJob {
    pub invocation: u64,
    pub client: Client,
    pub target: Arc<RequestTarget>,
    pub timeout_ms: Option<u64>,
    pub sink: Arc<dyn OutputSink>,
    pub reports: Option<mpsc::UnboundedSender<TickReport>>,
}

impl RequestJob {
    /// Run to completion, or until `cancel` fires.
    ///
    /// A dropped `cancel` sender does not cancel the request.
    pub(crate) async fn run(self, cancel: oneshot::Receiver<()>) {
        let outcome = tokio::select! {
            result = self.fetch() => match result {
                Ok((status, bytes)) => TickOutcome::Completed { status, bytes },
                Err(e) => {
                    tracing::warn!(
                        invocation = self.invocation,
                        url = %self.target.url,
                        error = %e,
                        "Request failed"
                    );
                    TickOutcome::Failed(e)
                }
            },
            Ok(()) = cancel => {
                tracing::debug!(invocation = self.invocation, "Request cancelled by a later tick");
                TickOutcome::Cancelled
            }
        };

        metrics::record_outcome(&outcome);
        if let Some(reports) = &self.reports {
            let _ = reports.send(TickReport {
                invocation: self.invocation,
                outcome,
            });
        }
    }

    async fn fetch(&self) -> Result<(u16, u64), PollError> {
        match self.timeout_ms {
            Some(limit_ms) => {
                let request = stream_response(&self.client, &self.target, self.sink.as_ref());
                time::timeout(Duration::from_millis(limit_ms), request)
                    .await
                    .map_err(|_| PollError::Timeout(limit_ms))?
            }
            None => stream_response(&self.client, &self.target, self.sink.as_ref()).await,
        }
    }
}

/// Send one request and forward every body chunk to `sink` in arrival order.
///
/// Returns the status code and the number of body bytes written.
pub async fn stream_response(
    client: &Client,
    target: &RequestTarget,
    sink: &dyn OutputSink,
) -> Result<(u16, u64), PollError> {
    let response = client
        .request(target.method.clone(), target.url.clone())
        .send()
        .await
        .map_err(PollError::Request)?;

    let status = response.status().as_u16();
    tracing::debug!(url = %target.url, status, "Response received");

    let mut body = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(PollError::Body)?;
        sink.write_chunk(&chunk)?;
        written += chunk.len() as u64;
        metrics::record_response_bytes(chunk.len());
    }

    Ok((status, written))
}
