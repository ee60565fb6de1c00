//! Tick outcomes and error definitions.

use thiserror::Error;

/// Errors that can end a single request.
#[derive(Debug, Error)]
pub enum PollError {
    /// Connection refused, DNS failure, or the request could not be sent.
    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    /// The response body stream broke before completion.
    #[error("Response body interrupted: {0}")]
    Body(reqwest::Error),

    /// Writing a chunk to the output sink failed.
    #[error("Output sink write failed: {0}")]
    Sink(#[from] std::io::Error),

    /// The configured per-request deadline elapsed.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),
}

/// Result of one tick's request.
#[derive(Debug)]
pub enum TickOutcome {
    /// The body was streamed to the sink in full. Status is informational only.
    Completed { status: u16, bytes: u64 },
    /// The request ended with an error; nothing is retried.
    Failed(PollError),
    /// No request was issued because the previous one was still in flight.
    Skipped,
    /// The request was aborted by a later tick.
    Cancelled,
}

impl TickOutcome {
    /// Short label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            TickOutcome::Completed { .. } => "completed",
            TickOutcome::Failed(_) => "failed",
            TickOutcome::Skipped => "skipped",
            TickOutcome::Cancelled => "cancelled",
        }
    }
}

/// Outcome of the request issued (or not) by one invocation.
#[derive(Debug)]
pub struct TickReport {
    /// Invocation counter value of the tick, starting at 1.
    pub invocation: u64,
    pub outcome: TickOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(TickOutcome::Completed { status: 500, bytes: 0 }.label(), "completed");
        assert_eq!(TickOutcome::Failed(PollError::Timeout(10)).label(), "failed");
        assert_eq!(TickOutcome::Skipped.label(), "skipped");
        assert_eq!(TickOutcome::Cancelled.label(), "cancelled");
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(PollError::Timeout(250).to_string(), "Request timed out after 250 ms");
    }
}
