//! Tracing setup
//!
//! Log lines go to stderr so command output on stdout stays clean.
//! `SPENDLINK_LOG` takes an `EnvFilter` directive; the default only shows
//! warnings.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogFormat;

/// Environment variable holding the filter directive
pub const LOG_ENV: &str = "SPENDLINK_LOG";

const DEFAULT_FILTER: &str = "warn,spendlink=warn";

/// Build the filter from `SPENDLINK_LOG`, falling back to the default
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(env_filter());

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let result = match format {
        LogFormat::Text => registry.with(base.compact()).try_init(),
        LogFormat::Json => registry.with(base.with_ansi(false).json()).try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}
