//! Diagnostic logging setup.
//!
//! Output goes to stderr so it never mixes with rendered sessions on stdout.
//! The filter comes from `SCOUT_LOG` (same syntax as `RUST_LOG`).

use tracing_subscriber::EnvFilter;

/// Default filter when `SCOUT_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "scout=warn";

/// Install the global tracing subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_env("SCOUT_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
