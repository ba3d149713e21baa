//! Tracing setup
//!
//! Diagnostics go to stderr so stdout stays clean for command output.
//! `RUST_LOG` wins over the `--verbose` default.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    tracing::debug!("Verbose mode enabled");
}
