//! Logging setup for the vmgate binary

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise vmgate logs at `info`, or `debug`
/// when `verbose` is set. Logs go to stderr so stdout carries only the report.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "vmgate=debug" } else { "vmgate=info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("Invalid log filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
