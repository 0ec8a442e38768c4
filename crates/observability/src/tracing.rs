//! Structured logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide tracing.
///
/// Emits JSON lines; the filter defaults to `info` and is overridable through
/// `RUST_LOG`. Calling this more than once is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init();
}
