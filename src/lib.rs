//! Currently-playing poller library.
//!
//! Polls a fixed HTTP endpoint on a fixed interval, logs a running invocation
//! counter and streams every response body to an output sink.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod poller;

pub use config::PollerConfig;
pub use lifecycle::Shutdown;
pub use poller::Poller;
