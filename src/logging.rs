/*!
 * Structured Logging
 * Subscriber setup for the crate's tracing output
 */

use crate::core::limits::{DEFAULT_LOG_FILTER, TRACE_JSON_ENV};
use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    EnvFilter,
};

/// Initialize structured tracing, ignoring an already-installed subscriber
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - ALLOCKIT_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let _ = try_init_tracing();
}

/// Initialize structured tracing, failing if a global subscriber is already set
pub fn try_init_tracing() -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()?;
        info!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .compact(),
            )
            .try_init()?;
        info!("Structured tracing initialized");
    }

    Ok(())
}
