//! # Structured Logging Module
//!
//! Opt-in tracing initialization for hosts that do not install their own
//! subscriber. Output format is environment-aware: plain fmt by default,
//! JSON when `LOG_FORMAT=json`.

use std::env;
use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with an environment-derived filter.
///
/// Safe to call more than once; only the first call installs a subscriber,
/// and installation is skipped silently when the host already set one.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let json_output = env::var("LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let result = if json_output {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_filter(filter),
                )
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_filter(filter),
                )
                .try_init()
        };

        // A pre-installed subscriber is not an error for a library.
        let _ = result;
    });
}
