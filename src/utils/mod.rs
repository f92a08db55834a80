// ============================================================================
// Utilities Module
// Process-level helpers for applications embedding the quoter
// ============================================================================

#[cfg(feature = "logging")]
mod logging;

#[cfg(feature = "logging")]
pub use logging::{init_logging, DEFAULT_LOG_FILTER};
