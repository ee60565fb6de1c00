//! Command line interface.
//!
//! Every flag is optional and can also be supplied through the environment.
//! Precedence is flag/env, then config file, then built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{read_config, ConfigError};
use crate::config::schema::{OverlapPolicy, PollerConfig};
use crate::config::validation::validate_config;

/// Poll the currently-playing endpoint on a fixed interval and stream each
/// response body to stdout.
#[derive(Parser, Debug, Default)]
#[command(name = "playing-poller", version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "POLLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Target host
    #[arg(long, env = "POLLER_HOST")]
    pub host: Option<String>,

    /// Target port
    #[arg(short, long, env = "POLLER_PORT")]
    pub port: Option<u16>,

    /// Target path
    #[arg(long, env = "POLLER_PATH")]
    pub path: Option<String>,

    /// Milliseconds between tick starts
    #[arg(short, long, env = "POLLER_INTERVAL_MS")]
    pub interval_ms: Option<u64>,

    /// Per-request deadline in milliseconds (none by default)
    #[arg(long, env = "POLLER_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// What to do when the previous request is still in flight
    #[arg(long, value_enum, env = "POLLER_OVERLAP")]
    pub overlap: Option<OverlapPolicy>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "POLLER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Serve Prometheus metrics on this address
    #[arg(long, env = "POLLER_METRICS_ADDRESS")]
    pub metrics_address: Option<String>,
}

impl Cli {
    /// Build the effective configuration: file (or defaults), then flags, then validation.
    pub fn resolve(&self) -> Result<PollerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => PollerConfig::default(),
        };
        self.apply_overrides(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Overwrite config fields with any values given on the command line.
    pub fn apply_overrides(&self, config: &mut PollerConfig) {
        if let Some(host) = &self.host {
            config.target.host = host.clone();
        }
        if let Some(port) = self.port {
            config.target.port = port;
        }
        if let Some(path) = &self.path {
            config.target.path = path.clone();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.schedule.interval_ms = interval_ms;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.schedule.timeout_ms = Some(timeout_ms);
        }
        if let Some(overlap) = self.overlap {
            config.schedule.overlap = overlap;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(addr) = &self.metrics_address {
            config.observability.metrics_address = Some(addr.clone());
        }
    }
}
