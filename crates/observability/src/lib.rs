//! Shared tracing setup for hosts embedding the state layer.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide structured logging.
///
/// Filtering comes from `RUST_LOG`, defaulting to `info`. Safe to call
/// multiple times; subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init()
        .is_ok()
    {
        tracing::debug!("structured logging initialized");
    }
}
