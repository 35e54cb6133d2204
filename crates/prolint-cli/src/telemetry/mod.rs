//! Structured logging initialisation for the CLI.

use std::io;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TELEMETRY_GUARD: Once = Once::new();

/// Installs the global tracing subscriber on first call.
///
/// Log lines go to stderr so they never mix with lint findings on
/// stdout. The filter is read from `RUST_LOG`, defaulting to `warn`.
/// Repeated calls are idempotent.
pub fn init() {
    TELEMETRY_GUARD.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        drop(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .compact()
                .try_init(),
        );
    });
}
