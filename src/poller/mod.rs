//! Fixed-interval poller.
//!
//! # Data Flow
//! ```text
//! Periodic timer (schedule.rs)
//!     → increment invocation counter, log it
//!     → apply overlap policy to the previous request
//!     → spawn request task (request.rs)
//!
//! Request task (request.rs):
//!     GET target
//!     → each body chunk written to the OutputSink (sink.rs), in arrival order
//!     → TickReport sent on the optional report channel
//! ```
//!
//! # State Machine
//! ```text
//! Idle → Requesting → Idle
//! ```
//! Driven only by the timer. No transition depends on the request outcome.
//!
//! # Design Decisions
//! - A tick never waits for its response; the timer is never blocked
//! - Response status is not inspected; non-2xx bodies are streamed unchanged
//! - Request failures are values on the report channel, never loop errors

pub mod request;
pub mod schedule;
pub mod sink;
pub mod types;

pub use schedule::Poller;
pub use sink::{MemorySink, OutputSink, StdoutSink};
pub use types::{PollError, TickOutcome, TickReport};
