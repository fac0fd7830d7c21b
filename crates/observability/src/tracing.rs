//! Tracing/logging initialization: JSON lines with timestamps, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

const FALLBACK_FILTER: &str = "info";

/// Pick the active filter: a valid `RUST_LOG` wins, then `default_filter`, then `info`.
pub fn filter(env_value: Option<&str>, default_filter: &str) -> EnvFilter {
    env_value
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_FILTER))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(default_filter: &str) {
    let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter(env_value.as_deref(), default_filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
