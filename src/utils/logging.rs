//! Logging setup
//!
//! Installs a global `tracing` subscriber. `RUST_LOG` takes precedence over
//! the configured level.

use crate::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// Returns `false` if a subscriber was already installed, which makes
/// repeated calls harmless (tests, embedding applications).
pub fn init_logging(level: &str, json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.is_ok()
}

/// Install the global subscriber from configuration
pub fn init_from_settings(settings: &LoggingSettings) -> bool {
    init_logging(&settings.level, settings.json)
}
