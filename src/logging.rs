//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! `RUST_LOG` wins when set; otherwise the configured filter is used.

use tracing_subscriber::EnvFilter;

pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
