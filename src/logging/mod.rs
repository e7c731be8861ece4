//! Structured logging setup built on the tracing crate

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Error type for logging setup
#[derive(Debug, Error)]
pub enum LogError {
    /// Error installing the global subscriber
    #[error("Subscriber error: {0}")]
    Subscriber(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set. Calling
/// this after a subscriber is already installed is a no-op.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.stdout {
        return Ok(());
    }

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(make_filter(config))
            .with_target(true)
            .try_init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(make_filter(config))
            .with_target(true)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(make_filter(config))
            .with_target(true)
            .try_init(),
    };

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.to_string().contains("already been set") => Ok(()),
        Err(err) => Err(LogError::Subscriber(err.to_string())),
    }
}

fn make_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()))
}
