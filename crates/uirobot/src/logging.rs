//! Diagnostic logging setup.
//!
//! Robots emit `tracing` events at `debug` (one per wait or interaction) and
//! `trace` (poll internals). Nothing is printed unless a subscriber is
//! installed; these helpers install the usual one for a test binary.

use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "uirobot=info";

/// Output format for [`init_tracing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, one line per event
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Install a global subscriber honouring `RUST_LOG`, falling back to
/// `default_filter`.
///
/// Returns `false` if a subscriber was already installed, which is the
/// common case when several tests in one binary call this.
pub fn try_init_tracing(default_filter: &str, format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = fmt().with_env_filter(filter).with_test_writer();

    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}

/// Install the default pretty subscriber, ignoring repeat calls
pub fn init_tracing() {
    let _ = try_init_tracing(DEFAULT_FILTER, LogFormat::Pretty);
}
