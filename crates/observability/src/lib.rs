//! Tracing and logging setup shared by the binaries.

/// Initialize process-wide tracing.
///
/// `default_filter` applies when `RUST_LOG` is not set. Safe to call multiple times;
/// subsequent calls become no-ops.
pub fn init(default_filter: &str) {
    tracing::init(default_filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
