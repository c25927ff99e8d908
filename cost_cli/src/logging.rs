// ============================================================================
// Logging
// ============================================================================
// tracing + tracing-subscriber, filter from RUST_LOG
// ============================================================================

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise logging to stderr.
///
/// `RUST_LOG` wins when set (e.g. `RUST_LOG=cost_core=debug`). Otherwise the
/// level is `warn`, or `debug` with `verbose`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
