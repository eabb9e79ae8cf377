//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::{Builder, Env};

/// Setup logging for the client.
///
/// `RUST_LOG` wins over the configured default filter.
pub fn setup_logging(default_filter: &str) {
    // Tests and embedders may have installed a logger already.
    let _ = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}
