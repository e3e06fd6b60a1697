use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::LogError;

/// Initialize the tracing subscriber for the crate's own diagnostics.
/// Uses JSON format when `RUST_LOG_FORMAT=json`, human-readable otherwise.
pub fn init_tracing() -> Result<(), LogError> {
    let use_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    let filter = EnvFilter::from_default_env().add_directive(Level::WARN.into());

    let result = if use_json {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .try_init()
    };

    result.map_err(|e| LogError::Config(format!("Failed to initialize tracing: {e}")))
}
