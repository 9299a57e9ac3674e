//! Tracing setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing for binaries and tests.
/// Filtering is controlled by `ROADMAP_LOG` (standard env-filter syntax),
/// defaulting to `warn`. Repeated calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("ROADMAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
