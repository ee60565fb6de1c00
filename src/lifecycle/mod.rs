//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger_on_signal → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     broadcast → Poller loop exits → process exits
//! ```
//!
//! In-flight requests are not drained; they end with the runtime.

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
