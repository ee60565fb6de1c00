//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → CLI flags / env vars (cli.rs)
//!     → validation.rs (semantic checks)
//!     → PollerConfig (validated, immutable)
//!     → handed to the Poller at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the Poller is built
//! - All fields have defaults, so running with no file and no flags polls
//!   `http://localhost:8080/spotify/currently-playing` once per second
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::ConfigError;
pub use schema::{ObservabilityConfig, OverlapPolicy, PollerConfig, ScheduleConfig, TargetConfig};
