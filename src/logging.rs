//! Diagnostic output setup.
//!
//! All diagnostics go to stderr, level-tagged, so stdout stays clean for the
//! list-sessions output. The debug flag lifts the filter from `warn` to
//! `debug`; `RUST_LOG` overrides both.

use std::io;

use tracing_subscriber::EnvFilter;

/// Default filter without the debug flag.
const DEFAULT_FILTER: &str = "warn";

/// Filter when the debug flag is set.
const DEBUG_FILTER: &str = "sshgrid=debug";

/// Initializes the tracing subscriber for this run.
pub fn init(debug: bool) {
    let fallback = if debug { DEBUG_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
