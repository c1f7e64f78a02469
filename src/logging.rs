//! Tracing subscriber setup.
//!
//! The engine only emits `tracing` events; hosts that already install a
//! subscriber need none of this.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a formatted subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns quietly if a global subscriber is already set.
///
/// ```no_run
/// bay_schedule::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

/// Debug-level subscriber writing through the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("bay_schedule=debug"))
        .with_test_writer()
        .try_init();
}
