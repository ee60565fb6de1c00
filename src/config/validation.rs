//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, port valid)
//! - Check the target assembles into a usable URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PollerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::PollerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("target.host must not be empty")]
    EmptyHost,

    #[error("target.port must not be 0")]
    ZeroPort,

    #[error("target.path '{0}' must start with '/'")]
    RelativePath(String),

    #[error("target.method '{0}' is not a valid HTTP method")]
    InvalidMethod(String),

    #[error("target does not form a valid URL: {0}")]
    InvalidUrl(String),

    #[error("schedule.interval_ms must be greater than 0")]
    ZeroInterval,

    #[error("schedule.timeout_ms must be greater than 0 when set")]
    ZeroTimeout,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &PollerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let target = &config.target;

    if target.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if target.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if !target.path.starts_with('/') {
        errors.push(ValidationError::RelativePath(target.path.clone()));
    }
    if reqwest::Method::from_bytes(target.method.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidMethod(target.method.clone()));
    }
    // Only worth checking when the parts themselves look sane.
    if errors.is_empty() {
        if let Err(e) = target.url() {
            errors.push(ValidationError::InvalidUrl(e.to_string()));
        }
    }

    if config.schedule.interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if config.schedule.timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
