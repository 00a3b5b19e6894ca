//! Log setup for the command-line tool.
//!
//! Logs go to stderr; stdout carries the expanded records.

use std::env;
use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable selecting `json` log lines instead of plain text.
pub const LOG_FORMAT_VAR: &str = "TYPEDEF_EXPANDER_LOG_FORMAT";

/// Default filter directive for a `-v` count.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `verbosity`.
pub fn init(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    let format = env::var(LOG_FORMAT_VAR).unwrap_or_else(|_| "text".to_string());
    let registry = tracing_subscriber::registry().with(env_filter);

    match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
            .try_init()?,
        _ => registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init()?,
    }

    Ok(())
}
