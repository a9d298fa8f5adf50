//! Tracing subscriber setup.
//!
//! The filter is read from `ERBOARD_LOG`, then `RUST_LOG`, and defaults to
//! `info`. Hosts that install their own subscriber can skip this entirely.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "ERBOARD_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install a formatting subscriber on stderr.
///
/// Returns false if a global subscriber was already installed.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
