//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the poller.
//! All types derive Serde traits for deserialization from config files.

use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration for the poller.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct PollerConfig {
    /// Endpoint polled on every tick.
    pub target: TargetConfig,

    /// Tick period and in-flight request handling.
    pub schedule: ScheduleConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Request target. Fixed for the lifetime of a Poller.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TargetConfig {
    /// Host name or IP address.
    pub host: String,

    /// TCP port.
    pub port: u16,

    /// Request path, starting with `/`.
    pub path: String,

    /// HTTP method.
    pub method: String,
}

impl TargetConfig {
    /// Full URL of the target, e.g. `http://localhost:8080/spotify/currently-playing`.
    ///
    /// IPv6 literals such as `::1` are bracketed.
    pub fn url(&self) -> Result<Url, url::ParseError> {
        let host = if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        Url::parse(&format!("http://{}:{}{}", host, self.port, self.path))
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
            path: "/spotify/currently-playing".to_string(),
            method: "GET".to_string(),
        }
    }
}

/// What a tick does when the previous request has not finished yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Issue a new request anyway; requests may overlap without bound.
    #[default]
    Allow,
    /// Keep the previous request and issue nothing this tick.
    Skip,
    /// Abort the previous request, then issue a new one.
    Cancel,
}

/// Tick scheduling configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Period between tick starts in milliseconds.
    pub interval_ms: u64,

    /// Per-request deadline in milliseconds. Unset means requests may hang forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Overlap handling for in-flight requests.
    pub overlap: OverlapPolicy,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            timeout_ms: None,
            overlap: OverlapPolicy::Allow,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Prometheus scrape endpoint bind address. No exporter when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
