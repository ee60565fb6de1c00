//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Poller produces:
//!     → logging.rs (structured log events: tick counter, failures)
//!     → metrics.rs (tick, outcome and byte counters)
//!
//! Consumers:
//!     → stderr (log lines; stdout is reserved for response bodies)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
