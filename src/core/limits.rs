/*!
 * Limits and Constants
 *
 * Crate-wide constants and environment variable names, grouped by domain.
 */

// =============================================================================
// PAGE LIMITS
// =============================================================================

/// Page cap used by `PageConfig::restricted()` (256 pages, 1MB at 4KB pages)
pub const RESTRICTED_MAX_PAGES: usize = 256;

/// Environment variable holding the per-request page cap
pub const MAX_PAGES_ENV: &str = "ALLOCKIT_MAX_PAGES";

// =============================================================================
// LOGGING
// =============================================================================

/// Filter applied when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Environment variable enabling JSON log output ("1" or "true")
pub const TRACE_JSON_ENV: &str = "ALLOCKIT_TRACE_JSON";
