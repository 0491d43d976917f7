//! Log setup for the `expenses` binary.
//!
//!   expenses --debug ...                     # debug logging
//!   RUST_LOG=expense_tracker=trace expenses  # fine-grained control
//!
//! Logs go to stderr so `--json` output on stdout stays parseable.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init_tracing(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
