//! Currently-playing poller.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────┐   every period   ┌──────────────┐   GET    ┌──────────────────────────────┐
//!   │ config + CLI │ ───────────────▶ │    Poller    │ ───────▶ │ localhost:8080               │
//!   └──────────────┘                  │ (counter)    │          │ /spotify/currently-playing   │
//!                                     └──────┬───────┘          └──────────────┬───────────────┘
//!                                            │ log counter                     │ body chunks
//!                                            ▼                                 ▼
//!                                         stderr                            stdout
//! ```
//!
//! With no flags, ticks once per second forever. Stops on SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;

use playing_poller::config::Cli;
use playing_poller::lifecycle::Shutdown;
use playing_poller::observability::{logging, metrics};
use playing_poller::poller::{Poller, StdoutSink};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve()?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!("playing-poller v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        host = %config.target.host,
        port = config.target.port,
        path = %config.target.path,
        interval_ms = config.schedule.interval_ms,
        timeout_ms = ?config.schedule.timeout_ms,
        overlap = ?config.schedule.overlap,
        "Configuration loaded"
    );

    if let Some(addr) = &config.observability.metrics_address {
        let addr: SocketAddr = addr.parse()?;
        metrics::init_metrics(addr);
    }

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let poller = Poller::new(&config, Arc::new(StdoutSink))?;
    let invocations = poller.run(shutdown.subscribe()).await;

    tracing::info!(invocations, "Shutdown complete");
    Ok(())
}
