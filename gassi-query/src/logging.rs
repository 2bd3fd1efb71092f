//! Logging bootstrap for Gassi.
//!
//! Library code only emits `tracing` events. Binaries call [`init`] once to
//! install a subscriber driven by environment variables:
//!
//! - `GASSI_DEBUG=true|1|yes` - enable debug logging
//! - `GASSI_LOG_LEVEL=trace|debug|info|warn|error` - explicit level
//! - `GASSI_LOG_FORMAT=json|pretty|compact` - output format (default: compact)
//!
//! ```rust,no_run
//! use gassi_query::logging;
//!
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Crates whose events are routed through the filter.
const TARGETS: &[&str] = &[
    "gassi",
    "gassi_query",
    "gassi_sqlite",
    "gassi_mysql",
    "gassi_postgres",
    "gassi_migrate",
    "gassi_cli",
];

/// Check whether `GASSI_DEBUG` is set to a truthy value.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("GASSI_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Log level from `GASSI_LOG_LEVEL`.
///
/// Unknown values fall back to "debug" when `GASSI_DEBUG` is on and "info"
/// otherwise, so migration progress stays visible by default.
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "info" };
    match env::var("GASSI_LOG_LEVEL") {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// Output format from `GASSI_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var("GASSI_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "json" => "json",
            "pretty" => "pretty",
            _ => "compact",
        })
        .unwrap_or("compact")
}

fn filter_directives(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(filter_directives(level))
                .unwrap_or_else(|_| EnvFilter::new("info"));

            // A subscriber installed by the host application takes precedence.
            let installed = match get_log_format() {
                "json" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .try_init(),
                "pretty" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact().with_writer(std::io::stderr))
                    .try_init(),
            };

            if installed.is_ok() {
                tracing::debug!(level, format = get_log_format(), "Gassi logging initialized");
            }
        }
    });
}

/// Initialize with debug logging forced on.
///
/// # Safety
///
/// Modifies the process environment; call before spawning threads.
pub fn init_debug() {
    // SAFETY: intended for program startup before other threads exist.
    unsafe {
        env::set_var("GASSI_DEBUG", "true");
    }
    init();
}
