//! Diagnostic logging.
//!
//! Diagnostics go to stderr so they never mix with command output. The
//! filter comes from `SHIFTCLOCK_LOG` (same syntax as `RUST_LOG`) and
//! defaults to `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SHIFTCLOCK_LOG";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
