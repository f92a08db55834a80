// ============================================================================
// Logging Setup
// Installs a global tracing subscriber filtered by RUST_LOG
// ============================================================================

use tracing_subscriber::EnvFilter;

/// Filter applied when RUST_LOG is unset or unparsable
pub const DEFAULT_LOG_FILTER: &str = "info,exchange_issuance=debug";

/// Install a formatted tracing subscriber as the global default.
///
/// Honors `RUST_LOG`; falls back to `default_filter` (or
/// [`DEFAULT_LOG_FILTER`] when `None`).
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(default_filter: Option<&str>) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.unwrap_or(DEFAULT_LOG_FILTER)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("Failed to install tracing subscriber: {}", e))
}
